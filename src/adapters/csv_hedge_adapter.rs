//! CSV extraction adapter.
//!
//! Reads the two tabular input files and renames their source columns to
//! the common schema: both sources call the start date `cod` (commercial
//! operation date) and the end date `date_merchant`. A required column
//! missing from the header is a schema error, not a parse error.

use crate::domain::config::EtlConfig;
use crate::domain::error::EtlError;
use crate::domain::record::{HedgeRecord, SourceKind};
use crate::ports::data_port::HedgeSource;
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct CsvHedgeAdapter {
    vmr_path: PathBuf,
    planif_path: PathBuf,
}

impl CsvHedgeAdapter {
    pub fn new(vmr_path: PathBuf, planif_path: PathBuf) -> Self {
        Self {
            vmr_path,
            planif_path,
        }
    }

    pub fn from_config(config: &EtlConfig) -> Self {
        Self::new(config.vmr_path.clone(), config.planif_path.clone())
    }

    fn path_for(&self, kind: SourceKind) -> &Path {
        match kind {
            SourceKind::Vmr => &self.vmr_path,
            SourceKind::Planif => &self.planif_path,
        }
    }
}

struct ColumnIndex {
    by_name: HashMap<String, usize>,
    source: SourceKind,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, source: SourceKind) -> Self {
        let by_name = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { by_name, source }
    }

    fn required(&self, column: &str) -> Result<usize, EtlError> {
        self.by_name
            .get(column)
            .copied()
            .ok_or_else(|| EtlError::Schema {
                kind: self.source,
                column: column.to_string(),
            })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.by_name.get(column).copied()
    }
}

fn cell<'a>(record: &'a StringRecord, idx: usize, row: usize, column: &str) -> Result<&'a str, EtlError> {
    record.get(idx).ok_or_else(|| EtlError::Extraction {
        reason: format!("row {row}: missing value for '{column}'"),
    })
}

fn parse_date(value: &str, row: usize, column: &str) -> Result<NaiveDate, EtlError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| EtlError::Extraction {
        reason: format!("row {row}: invalid date in '{column}' ({e})"),
    })
}

fn parse_flag(value: &str, row: usize, column: &str) -> Result<bool, EtlError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "oui" | "1" => Ok(true),
        "false" | "non" | "0" | "" => Ok(false),
        other => Err(EtlError::Extraction {
            reason: format!("row {row}: invalid flag '{other}' in '{column}'"),
        }),
    }
}

impl HedgeSource for CsvHedgeAdapter {
    fn fetch(&self, kind: SourceKind) -> Result<Vec<HedgeRecord>, EtlError> {
        let path = self.path_for(kind);
        let mut reader = csv::Reader::from_path(path).map_err(|e| EtlError::Extraction {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        let headers = reader
            .headers()
            .map_err(|e| EtlError::Extraction {
                reason: format!("failed to read header of {}: {}", path.display(), e),
            })?
            .clone();
        let columns = ColumnIndex::from_headers(&headers, kind);

        let id_idx = columns.required("id")?;
        let hedge_id_idx = columns.required("hedge_id")?;
        let projet_id_idx = columns.required("projet_id")?;
        let projet_idx = columns.required("projet")?;
        let technologie_idx = columns.required("technologie")?;
        let cod_idx = columns.required("cod")?;
        let date_merchant_idx = columns.required("date_merchant")?;
        let puissance_idx = columns.required("puissance_installée")?;
        let en_planif_idx = columns.required("en_planif")?;
        // Only the vmr source carries a hedge type; planif gets one assigned.
        let type_hedge_idx = match kind {
            SourceKind::Vmr => Some(columns.required("type_hedge")?),
            SourceKind::Planif => columns.optional("type_hedge"),
        };

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let row = i + 2; // 1-based, after the header line
            let record = result.map_err(|e| EtlError::Extraction {
                reason: format!("row {row}: {e}"),
            })?;

            let id: i64 = cell(&record, id_idx, row, "id")?
                .trim()
                .parse()
                .map_err(|e| EtlError::Extraction {
                    reason: format!("row {row}: invalid id ({e})"),
                })?;

            let puissance_installee: f64 = cell(&record, puissance_idx, row, "puissance_installée")?
                .trim()
                .parse()
                .map_err(|e| EtlError::Extraction {
                    reason: format!("row {row}: invalid puissance_installée ({e})"),
                })?;

            let type_hedge = match type_hedge_idx {
                Some(idx) => {
                    let raw = cell(&record, idx, row, "type_hedge")?.trim();
                    if raw.is_empty() {
                        None
                    } else {
                        Some(raw.to_string())
                    }
                }
                None => None,
            };

            rows.push(HedgeRecord {
                id,
                hedge_id: cell(&record, hedge_id_idx, row, "hedge_id")?.trim().to_string(),
                projet_id: cell(&record, projet_id_idx, row, "projet_id")?.trim().to_string(),
                projet: cell(&record, projet_idx, row, "projet")?.trim().to_string(),
                technologie: cell(&record, technologie_idx, row, "technologie")?
                    .trim()
                    .to_string(),
                type_hedge,
                date_debut: parse_date(cell(&record, cod_idx, row, "cod")?, row, "cod")?,
                date_fin: parse_date(
                    cell(&record, date_merchant_idx, row, "date_merchant")?,
                    row,
                    "date_merchant",
                )?,
                puissance_installee,
                en_planif: parse_flag(
                    cell(&record, en_planif_idx, row, "en_planif")?,
                    row,
                    "en_planif",
                )?,
            });
        }

        Ok(rows)
    }
}
