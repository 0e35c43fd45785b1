//! Override rule tables for hedge-type classification.
//!
//! Each source kind carries a set of project identifiers whose records are
//! forced to hedge-type "PPA". The sets are configuration, not code: the
//! built-in defaults reproduce the historical lists but any config file can
//! replace them.

use std::collections::HashSet;

/// Projects forced to "PPA" regardless of source hedge-type.
#[derive(Debug, Clone, Default)]
pub struct OverrideRules {
    pub ppa_projects: HashSet<String>,
}

impl OverrideRules {
    pub fn new<I, S>(projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ppa_projects: projects.into_iter().map(Into::into).collect(),
        }
    }

    pub fn forces_ppa(&self, projet_id: &str) -> bool {
        self.ppa_projects.contains(projet_id)
    }
}

/// Historical PPA override list for the vmr source.
pub const DEFAULT_PPA_VMR: [&str; 7] = ["NIBA", "CHEP", "ALBE", "ALME", "ALMO", "ALVE", "PLOU"];

/// Historical PPA override list for the planif source.
pub const DEFAULT_PPA_PLANIF: [&str; 2] = ["SE19", "SE07"];

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuleListError {
    #[error("empty token in project list")]
    EmptyToken,

    #[error("duplicate project: {0}")]
    DuplicateProject(String),
}

/// Parse a comma-separated project list from configuration.
///
/// Tokens are trimmed and uppercased; empty tokens and duplicates are
/// rejected rather than silently dropped.
pub fn parse_project_list(input: &str) -> Result<OverrideRules, RuleListError> {
    let mut projects = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(RuleListError::EmptyToken);
        }
        let projet_id = trimmed.to_uppercase();
        if !projects.insert(projet_id.clone()) {
            return Err(RuleListError::DuplicateProject(projet_id));
        }
    }

    Ok(OverrideRules { ppa_projects: projects })
}
