//! PostgreSQL extraction adapter.
//!
//! Alternative to the CSV source for sites that stage the hedge tables in a
//! warehouse. One query per source kind, renaming the staging columns to
//! the common schema in SQL.

use crate::domain::error::EtlError;
use crate::domain::record::{HedgeRecord, SourceKind};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::HedgeSource;
use chrono::NaiveDate;
use postgres::{Client, NoTls};
use std::cell::RefCell;

pub struct PostgresHedgeAdapter {
    client: RefCell<Client>,
}

impl PostgresHedgeAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, EtlError> {
        let conninfo = config
            .get_string("database", "conninfo")
            .ok_or_else(|| EtlError::ConfigMissing {
                section: "database".into(),
                key: "conninfo".into(),
            })?;

        let client = Client::connect(&conninfo, NoTls).map_err(|e| EtlError::Database {
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: RefCell::new(client),
        })
    }

    fn query_for(kind: SourceKind) -> &'static str {
        match kind {
            SourceKind::Vmr => {
                "SELECT id::bigint, hedge_id, projet_id, projet, technologie, type_hedge, \
                        cod::date, date_merchant::date, \
                        puissance_installee::double precision, en_planif \
                 FROM staging.hedge_vmr \
                 ORDER BY id ASC"
            }
            SourceKind::Planif => {
                "SELECT id::bigint, hedge_id, projet_id, projet, technologie, NULL::text, \
                        cod::date, date_merchant::date, \
                        puissance_installee::double precision, en_planif \
                 FROM staging.hedge_planif \
                 ORDER BY id ASC"
            }
        }
    }
}

impl HedgeSource for PostgresHedgeAdapter {
    fn fetch(&self, kind: SourceKind) -> Result<Vec<HedgeRecord>, EtlError> {
        let rows = self
            .client
            .borrow_mut()
            .query(Self::query_for(kind), &[])
            .map_err(|e| EtlError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let records = rows
            .into_iter()
            .map(|row| {
                let date_debut: NaiveDate = row.get(6);
                let date_fin: NaiveDate = row.get(7);
                HedgeRecord {
                    id: row.get(0),
                    hedge_id: row.get(1),
                    projet_id: row.get(2),
                    projet: row.get(3),
                    technologie: row.get(4),
                    type_hedge: row.get(5),
                    date_debut,
                    date_fin,
                    puissance_installee: row.get(8),
                    en_planif: row.get(9),
                }
            })
            .collect();

        Ok(records)
    }
}
