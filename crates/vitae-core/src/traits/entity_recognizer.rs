//! Named-entity recognition capability.

use async_trait::async_trait;

use crate::error::ResumeResult;
use crate::types::Entity;

/// Tags spans of text with entity labels such as `PERSON`.
///
/// Entities are returned in document order.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in `text`.
    async fn entities(&self, text: &str) -> ResumeResult<Vec<Entity>>;

    /// Identifier of the underlying model.
    fn model_name(&self) -> &str;
}
