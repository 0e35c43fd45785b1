//! Domain error types.

use crate::domain::record::SourceKind;

/// Top-level error type for templateur.
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("extraction error: {reason}")]
    Extraction { reason: String },

    // Field is named `kind` because thiserror reserves `source` for error
    // chaining.
    #[error("missing column '{column}' in {kind} input")]
    Schema { kind: SourceKind, column: String },

    #[error("transform error: {reason}")]
    Transform { reason: String },

    #[error("load error: {reason}")]
    Load { reason: String },

    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&EtlError> for std::process::ExitCode {
    fn from(err: &EtlError) -> Self {
        let code: u8 = match err {
            EtlError::Io(_) => 1,
            EtlError::ConfigParse { .. }
            | EtlError::ConfigMissing { .. }
            | EtlError::ConfigInvalid { .. } => 2,
            EtlError::Extraction { .. }
            | EtlError::Schema { .. }
            | EtlError::Database { .. }
            | EtlError::DatabaseQuery { .. } => 3,
            EtlError::Transform { .. } => 4,
            EtlError::Load { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_source_and_column() {
        let err = EtlError::Schema {
            kind: SourceKind::Vmr,
            column: "projet_id".into(),
        };
        assert_eq!(err.to_string(), "missing column 'projet_id' in vmr input");
    }

    #[test]
    fn schema_error_carries_no_error_source() {
        use std::error::Error;

        let err = EtlError::Schema {
            kind: SourceKind::Planif,
            column: "cod".into(),
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn config_missing_formats_section_and_key() {
        let err = EtlError::ConfigMissing {
            section: "paths".into(),
            key: "vmr".into(),
        };
        assert_eq!(err.to_string(), "missing config key [paths] vmr");
    }
}
