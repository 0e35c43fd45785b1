//! Resolved run configuration.
//!
//! Everything the builder needs is read once from a [`ConfigPort`] into an
//! explicit struct: input paths, destination, and the override rule tables.
//! The historical PPA project lists are only defaults; a config file can
//! replace either list without a code change.

use std::path::{Path, PathBuf};

use crate::domain::error::EtlError;
use crate::domain::rules::{parse_project_list, OverrideRules, DEFAULT_PPA_PLANIF, DEFAULT_PPA_VMR};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_OUTPUT_NAME: &str = "template_hedge.csv";

/// Which extraction backend a run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceBackend {
    Csv,
    Postgres,
}

#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub backend: SourceBackend,
    pub vmr_path: PathBuf,
    pub planif_path: PathBuf,
    pub dest_dir: PathBuf,
    pub output_name: String,
    pub vmr_overrides: OverrideRules,
    pub planif_overrides: OverrideRules,
}

impl EtlConfig {
    /// Build the run configuration from a config source.
    ///
    /// `[paths] vmr`, `[paths] planif` and `[paths] dest_dir` are required;
    /// `[paths] output_name` and the `[rules]` lists fall back to defaults.
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, EtlError> {
        let backend = match config.get_string("source", "backend").as_deref() {
            None | Some("csv") => SourceBackend::Csv,
            Some("postgres") => SourceBackend::Postgres,
            Some(other) => {
                return Err(EtlError::ConfigInvalid {
                    section: "source".into(),
                    key: "backend".into(),
                    reason: format!("unknown backend '{other}' (expected csv or postgres)"),
                });
            }
        };

        let vmr_path = required_path(config, "paths", "vmr")?;
        let planif_path = required_path(config, "paths", "planif")?;
        let dest_dir = required_path(config, "paths", "dest_dir")?;

        let output_name = config
            .get_string("paths", "output_name")
            .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string());

        let vmr_overrides = override_list(config, "ppa_vmr", &DEFAULT_PPA_VMR)?;
        let planif_overrides = override_list(config, "ppa_planif", &DEFAULT_PPA_PLANIF)?;

        Ok(Self {
            backend,
            vmr_path,
            planif_path,
            dest_dir,
            output_name,
            vmr_overrides,
            planif_overrides,
        })
    }

    pub fn output_path(&self) -> PathBuf {
        self.dest_dir.join(&self.output_name)
    }
}

fn required_path(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<PathBuf, EtlError> {
    config
        .get_string(section, key)
        .map(|s| Path::new(&s).to_path_buf())
        .ok_or_else(|| EtlError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

fn override_list(
    config: &dyn ConfigPort,
    key: &str,
    default: &[&str],
) -> Result<OverrideRules, EtlError> {
    match config.get_string("rules", key) {
        Some(list) => parse_project_list(&list).map_err(|e| EtlError::ConfigInvalid {
            section: "rules".into(),
            key: key.into(),
            reason: e.to_string(),
        }),
        None => Ok(OverrideRules::new(default.iter().copied())),
    }
}
