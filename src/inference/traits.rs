//! Inference trait abstraction

use crate::error::Result;
use crate::types::MetadataRecord;

/// Metadata inference backend
pub trait MetadataInferrer: Send + Sync {
    /// Infer song metadata from a cleaned file-name hint.
    ///
    /// One outbound service call per invocation; callers are responsible for
    /// pacing successive calls.
    fn infer(&self, hint: &str) -> Result<MetadataRecord>;

    /// Get the name of this backend (for logging)
    fn name(&self) -> &'static str;
}
