//! Hedge record representations for the two input sources and the
//! unified output schema.

use chrono::NaiveDate;
use std::fmt;

/// Which input table a record came from.
///
/// `Vmr` is the live/production source ("Volumes Market Repowering"),
/// `Planif` the planning-stage source aggregated separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Vmr,
    Planif,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Vmr => write!(f, "vmr"),
            SourceKind::Planif => write!(f, "planif"),
        }
    }
}

/// One raw input row, already renamed to the common schema.
///
/// The planif source carries no hedge-type column; classification assigns
/// one unconditionally, so `type_hedge` is `None` for planif rows.
#[derive(Debug, Clone)]
pub struct HedgeRecord {
    pub id: i64,
    pub hedge_id: String,
    pub projet_id: String,
    pub projet: String,
    pub technologie: String,
    pub type_hedge: Option<String>,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub puissance_installee: f64,
    pub en_planif: bool,
}

/// One output row of the hedge template.
///
/// `id` is a dense 1-based renumbering assigned at merge time; until then it
/// holds 0. `profil`, `contrepartie` and `pays_contrepartie` exist in the
/// output schema but are never populated by the current transform.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedHedgeRecord {
    pub id: i64,
    pub hedge_id: String,
    pub projet_id: String,
    pub projet: String,
    pub technologie: String,
    pub type_hedge: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub puissance_installee: f64,
    pub profil: Option<String>,
    pub pct_couverture: Option<f64>,
    pub contrepartie: Option<String>,
    pub pays_contrepartie: Option<String>,
    pub en_planif: bool,
}

/// Output column order of the written template.
pub const OUTPUT_COLUMNS: [&str; 14] = [
    "id",
    "hedge_id",
    "projet_id",
    "projet",
    "technologie",
    "type_hedge",
    "date_debut",
    "date_fin",
    "puissance_installée",
    "profil",
    "pct_couverture",
    "contrepartie",
    "pays_contrepartie",
    "en_planif",
];
