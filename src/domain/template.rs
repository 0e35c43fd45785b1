//! Hedge template construction: per-source classification followed by a
//! merge that renumbers the output.
//!
//! Classification is a pure mapping over typed records. Schema problems
//! (missing columns, unparseable cells) are caught by the extraction
//! adapters before records reach this module.

use crate::domain::record::{HedgeRecord, SourceKind, UnifiedHedgeRecord};
use crate::domain::rules::OverrideRules;

/// Classify raw records from one source into the unified schema.
///
/// For vmr records the source hedge-type "FiT" is renamed to "OA", other
/// values pass through; a second pass then forces "PPA" for any project in
/// the override set, replacing whatever the first pass produced. For planif
/// records the hedge-type is "CR" unless overridden to "PPA".
///
/// Coverage is 1.0 on every path the current rules can reach. The planif
/// branch only assigns it for "CR" and "PPA" outcomes; any other outcome
/// would leave it unset, and that gap is kept as-is.
///
/// Output order equals input order. The renumbered output id is assigned by
/// [`merge`], not here; until then `id` carries 0.
pub fn classify_and_normalize(
    records: &[HedgeRecord],
    source_kind: SourceKind,
    overrides: &OverrideRules,
) -> Vec<UnifiedHedgeRecord> {
    records
        .iter()
        .map(|r| {
            let type_hedge = match source_kind {
                SourceKind::Vmr => {
                    let renamed = match r.type_hedge.as_deref() {
                        Some("FiT") => "OA".to_string(),
                        Some(other) => other.to_string(),
                        None => String::new(),
                    };
                    if overrides.forces_ppa(&r.projet_id) {
                        "PPA".to_string()
                    } else {
                        renamed
                    }
                }
                SourceKind::Planif => {
                    if overrides.forces_ppa(&r.projet_id) {
                        "PPA".to_string()
                    } else {
                        "CR".to_string()
                    }
                }
            };

            let pct_couverture = match source_kind {
                // Three vestigial branches in the historical rules, all 1.0.
                SourceKind::Vmr => Some(1.0),
                SourceKind::Planif => match type_hedge.as_str() {
                    "CR" | "PPA" => Some(1.0),
                    _ => None,
                },
            };

            UnifiedHedgeRecord {
                id: 0,
                hedge_id: r.hedge_id.clone(),
                projet_id: r.projet_id.clone(),
                projet: r.projet.clone(),
                technologie: r.technologie.clone(),
                type_hedge,
                date_debut: r.date_debut,
                date_fin: r.date_fin,
                puissance_installee: r.puissance_installee,
                profil: None,
                pct_couverture,
                contrepartie: None,
                pays_contrepartie: None,
                en_planif: r.en_planif,
            }
        })
        .collect()
}

/// Concatenate vmr rows followed by planif rows and assign dense 1-based
/// ids in concatenation order. Original input ids are discarded. No
/// deduplication: a project present in both sources appears twice.
pub fn merge(
    vmr_normalized: Vec<UnifiedHedgeRecord>,
    planif_normalized: Vec<UnifiedHedgeRecord>,
) -> Vec<UnifiedHedgeRecord> {
    let mut template = vmr_normalized;
    template.extend(planif_normalized);
    for (i, record) in template.iter_mut().enumerate() {
        record.id = (i + 1) as i64;
    }
    template
}

/// Full transform: classify both sources and merge.
pub fn build_template(
    vmr_records: &[HedgeRecord],
    planif_records: &[HedgeRecord],
    vmr_overrides: &OverrideRules,
    planif_overrides: &OverrideRules,
) -> Vec<UnifiedHedgeRecord> {
    let vmr = classify_and_normalize(vmr_records, SourceKind::Vmr, vmr_overrides);
    let planif = classify_and_normalize(planif_records, SourceKind::Planif, planif_overrides);
    merge(vmr, planif)
}
