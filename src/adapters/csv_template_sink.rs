//! CSV output adapter.
//!
//! Writes the merged template to `<dest>.tmp` and renames it into place on
//! success, so a failed run never leaves a half-written file at the final
//! path. Coverage is formatted with 4 decimal places; unset nullable fields
//! become empty cells.

use crate::domain::error::EtlError;
use crate::domain::record::{UnifiedHedgeRecord, OUTPUT_COLUMNS};
use crate::ports::sink_port::TemplateSink;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct CsvTemplateSink;

impl CsvTemplateSink {
    pub fn new() -> Self {
        Self
    }

    fn temp_path(dest: &Path) -> PathBuf {
        let mut name = dest.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        dest.with_file_name(name)
    }
}

fn format_row(record: &UnifiedHedgeRecord) -> [String; 14] {
    [
        record.id.to_string(),
        record.hedge_id.clone(),
        record.projet_id.clone(),
        record.projet.clone(),
        record.technologie.clone(),
        record.type_hedge.clone(),
        record.date_debut.format("%Y-%m-%d").to_string(),
        record.date_fin.format("%Y-%m-%d").to_string(),
        format!("{:.4}", record.puissance_installee),
        record.profil.clone().unwrap_or_default(),
        record
            .pct_couverture
            .map(|p| format!("{p:.4}"))
            .unwrap_or_default(),
        record.contrepartie.clone().unwrap_or_default(),
        record.pays_contrepartie.clone().unwrap_or_default(),
        record.en_planif.to_string(),
    ]
}

impl TemplateSink for CsvTemplateSink {
    fn write(&self, records: &[UnifiedHedgeRecord], dest: &Path) -> Result<(), EtlError> {
        let temp = Self::temp_path(dest);

        let mut writer = csv::Writer::from_path(&temp).map_err(|e| EtlError::Load {
            reason: format!("failed to create {}: {}", temp.display(), e),
        })?;

        writer
            .write_record(OUTPUT_COLUMNS)
            .map_err(|e| EtlError::Load {
                reason: format!("failed to write header: {e}"),
            })?;

        for record in records {
            writer
                .write_record(format_row(record))
                .map_err(|e| EtlError::Load {
                    reason: format!("failed to write row {}: {}", record.id, e),
                })?;
        }

        writer.flush().map_err(|e| EtlError::Load {
            reason: format!("failed to flush {}: {}", temp.display(), e),
        })?;
        drop(writer);

        fs::rename(&temp, dest).map_err(|e| EtlError::Load {
            reason: format!(
                "failed to move {} to {}: {}",
                temp.display(),
                dest.display(),
                e
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample(id: i64, pct: Option<f64>) -> UnifiedHedgeRecord {
        UnifiedHedgeRecord {
            id,
            hedge_id: format!("H-{id:02}"),
            projet_id: "NIBA".into(),
            projet: "Niberolle".into(),
            technologie: "eolien".into(),
            type_hedge: "PPA".into(),
            date_debut: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            date_fin: NaiveDate::from_ymd_opt(2036, 5, 31).unwrap(),
            puissance_installee: 18.4,
            profil: None,
            pct_couverture: pct,
            contrepartie: None,
            pays_contrepartie: None,
            en_planif: false,
        }
    }

    #[test]
    fn writes_header_and_formatted_rows() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("template_hedge.csv");

        CsvTemplateSink::new()
            .write(&[sample(1, Some(1.0))], &dest)
            .unwrap();

        let content = fs::read_to_string(&dest).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,hedge_id,projet_id,projet,technologie,type_hedge,date_debut,date_fin,\
             puissance_installée,profil,pct_couverture,contrepartie,pays_contrepartie,en_planif"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,H-01,NIBA,Niberolle,eolien,PPA,2021-06-01,2036-05-31,18.4000,,1.0000,,,false"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn unset_coverage_is_an_empty_cell() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("template_hedge.csv");

        CsvTemplateSink::new().write(&[sample(1, None)], &dest).unwrap();

        let content = fs::read_to_string(&dest).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert!(row.contains(",2036-05-31,18.4000,,,"), "row: {row}");
    }

    #[test]
    fn no_temp_file_remains_after_success() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("template_hedge.csv");

        CsvTemplateSink::new()
            .write(&[sample(1, Some(1.0))], &dest)
            .unwrap();

        assert!(dest.exists());
        assert!(!dir.path().join("template_hedge.csv.tmp").exists());
    }

    #[test]
    fn write_to_missing_directory_is_load_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("no_such_dir").join("out.csv");

        let err = CsvTemplateSink::new()
            .write(&[sample(1, Some(1.0))], &dest)
            .unwrap_err();
        assert!(matches!(err, EtlError::Load { .. }));
    }

    #[test]
    fn reruns_produce_byte_identical_output() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("template_hedge.csv");
        let records = vec![sample(1, Some(1.0)), sample(2, Some(1.0))];

        let sink = CsvTemplateSink::new();
        sink.write(&records, &dest).unwrap();
        let first = fs::read(&dest).unwrap();
        sink.write(&records, &dest).unwrap();
        let second = fs::read(&dest).unwrap();

        assert_eq!(first, second);
    }
}
