#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use templateur::domain::error::EtlError;
pub use templateur::domain::record::{HedgeRecord, SourceKind};
use templateur::domain::rules::{OverrideRules, DEFAULT_PPA_PLANIF, DEFAULT_PPA_VMR};
use templateur::ports::data_port::HedgeSource;

pub struct MockHedgeSource {
    pub data: HashMap<SourceKind, Vec<HedgeRecord>>,
    pub errors: HashMap<SourceKind, String>,
}

impl MockHedgeSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_rows(mut self, kind: SourceKind, rows: Vec<HedgeRecord>) -> Self {
        self.data.insert(kind, rows);
        self
    }

    pub fn with_error(mut self, kind: SourceKind, reason: &str) -> Self {
        self.errors.insert(kind, reason.to_string());
        self
    }
}

impl HedgeSource for MockHedgeSource {
    fn fetch(&self, kind: SourceKind) -> Result<Vec<HedgeRecord>, EtlError> {
        if let Some(reason) = self.errors.get(&kind) {
            return Err(EtlError::Extraction {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(&kind).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_record(id: i64, projet_id: &str, type_hedge: Option<&str>) -> HedgeRecord {
    HedgeRecord {
        id,
        hedge_id: format!("H-{id:03}"),
        projet_id: projet_id.to_string(),
        projet: format!("Projet {projet_id}"),
        technologie: "eolien".to_string(),
        type_hedge: type_hedge.map(str::to_string),
        date_debut: date(2022, 1, 1),
        date_fin: date(2036, 12, 31),
        puissance_installee: 10.0,
        en_planif: false,
    }
}

pub fn vmr_rules() -> OverrideRules {
    OverrideRules::new(DEFAULT_PPA_VMR)
}

pub fn planif_rules() -> OverrideRules {
    OverrideRules::new(DEFAULT_PPA_PLANIF)
}
