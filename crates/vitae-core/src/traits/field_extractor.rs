//! Field extractor capability.

use async_trait::async_trait;

use crate::error::ResumeResult;
use crate::types::FieldValue;

/// Derives one resume attribute from raw resume text.
///
/// Implementations fail with `EmptyInput` on blank text and with
/// `ExtractionFailed` when no value can be found. Failures of external
/// collaborators (NER models, LLMs) must be reported as `ExtractionFailed`
/// rather than leaked.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Extract the field value from `text`.
    async fn extract(&self, text: &str) -> ResumeResult<FieldValue>;

    /// Human-readable name for this extraction strategy.
    fn name(&self) -> &str;
}
