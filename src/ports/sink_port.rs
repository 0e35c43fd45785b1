//! Output port trait.

use std::path::Path;

use crate::domain::error::EtlError;
use crate::domain::record::UnifiedHedgeRecord;

/// Destination for the merged hedge template.
pub trait TemplateSink {
    fn write(&self, records: &[UnifiedHedgeRecord], dest: &Path) -> Result<(), EtlError>;
}
