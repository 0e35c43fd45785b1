//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_paths_section() {
        let content = r#"
[paths]
vmr = /data/in/volumes_market_repowering.csv
planif = /data/in/planification_agregee.csv
dest_dir = /data/out

[rules]
ppa_vmr = NIBA,CHEP,ALBE
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("paths", "vmr"),
            Some("/data/in/volumes_market_repowering.csv".to_string())
        );
        assert_eq!(
            adapter.get_string("rules", "ppa_vmr"),
            Some("NIBA,CHEP,ALBE".to_string())
        );
    }

    #[test]
    fn missing_key_is_none() {
        let adapter = FileConfigAdapter::from_string("[paths]\ndest_dir = /out\n").unwrap();
        assert_eq!(adapter.get_string("paths", "vmr"), None);
        assert_eq!(adapter.get_string("database", "conninfo"), None);
    }

    #[test]
    fn values_keep_their_raw_spelling() {
        let adapter = FileConfigAdapter::from_string(
            "[source]\nbackend = postgres\n\n[rules]\nppa_planif = SE19,SE07\n",
        )
        .unwrap();
        assert_eq!(
            adapter.get_string("source", "backend"),
            Some("postgres".to_string())
        );
        assert_eq!(
            adapter.get_string("rules", "ppa_planif"),
            Some("SE19,SE07".to_string())
        );
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[paths]\ndest_dir = /shared/out\n").unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("paths", "dest_dir"),
            Some("/shared/out".to_string())
        );
    }

    #[test]
    fn from_file_errors_on_missing_file() {
        assert!(FileConfigAdapter::from_file("/nonexistent/config.ini").is_err());
    }
}
