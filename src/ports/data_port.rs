//! Extraction port trait.

use crate::domain::error::EtlError;
use crate::domain::record::{HedgeRecord, SourceKind};

/// Source of raw hedge rows, already renamed to the common schema.
pub trait HedgeSource {
    fn fetch(&self, kind: SourceKind) -> Result<Vec<HedgeRecord>, EtlError>;
}
