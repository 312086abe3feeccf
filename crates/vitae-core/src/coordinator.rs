//! Coordinator that runs every field extractor over the same resume text.

use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;

use crate::error::{ResumeError, ResumeResult};
use crate::observer::{ExtractionEvent, ExtractionObserver, TracingObserver};
use crate::traits::FieldExtractor;
use crate::types::{
    ExtractionReport, FieldValue, ResumeData, EMAIL_FIELD, NAME_FIELD, REQUIRED_FIELDS,
    SKILLS_FIELD,
};

/// Coordinates extraction of all resume fields.
///
/// Holds a field-name to extractor mapping (in registration order). Every
/// extractor runs on the same text and one failure never prevents the others
/// from running. Failed fields are replaced by a default value; whether that
/// is acceptable is decided by `allow_partial`.
pub struct ResumeExtractor {
    extractors: IndexMap<String, Arc<dyn FieldExtractor>>,
    allow_partial: bool,
    observer: Arc<dyn ExtractionObserver>,
}

impl ResumeExtractor {
    /// Create a coordinator from field-name/extractor pairs.
    ///
    /// Fails with a configuration error naming every missing required field
    /// (`name`, `email`, `skills`). Extra fields are allowed; they are
    /// extracted but not part of [`ResumeData`].
    pub fn new<I, K>(extractors: I, allow_partial: bool) -> ResumeResult<Self>
    where
        I: IntoIterator<Item = (K, Arc<dyn FieldExtractor>)>,
        K: Into<String>,
    {
        let extractors: IndexMap<String, Arc<dyn FieldExtractor>> = extractors
            .into_iter()
            .map(|(field, extractor)| (field.into(), extractor))
            .collect();

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !extractors.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            tracing::error!(?missing, "Missing required extractors");
            return Err(ResumeError::configuration(format!(
                "Missing required extractors: {}",
                missing.join(", ")
            )));
        }

        tracing::info!(
            fields = ?extractors.keys().collect::<Vec<_>>(),
            allow_partial,
            "ResumeExtractor initialized"
        );

        Ok(Self {
            extractors,
            allow_partial,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the observer that receives extraction events.
    pub fn with_observer(mut self, observer: Arc<dyn ExtractionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Whether failed fields are tolerated.
    pub fn allow_partial(&self) -> bool {
        self.allow_partial
    }

    /// All configured field names, in registration order.
    pub fn configured_fields(&self) -> Vec<&str> {
        self.extractors.keys().map(String::as_str).collect()
    }

    /// Extract all fields from resume text.
    pub async fn extract(&self, text: &str) -> ResumeResult<ResumeData> {
        self.extract_with_report(text).await.map(|report| report.data)
    }

    /// Extract all fields and also return the per-field errors that were
    /// tolerated in partial mode.
    pub async fn extract_with_report(&self, text: &str) -> ResumeResult<ExtractionReport> {
        if text.trim().is_empty() {
            return Err(ResumeError::empty_input("Cannot extract from empty text"));
        }

        self.observer.on_event(&ExtractionEvent::Started {
            fields: self.extractors.keys().cloned().collect(),
        });

        let outcomes = join_all(self.extractors.iter().map(|(field, extractor)| async move {
            tracing::debug!(field = %field, extractor = extractor.name(), "Extracting field");
            (field.as_str(), extractor.extract(text).await)
        }))
        .await;

        let mut values: IndexMap<&str, FieldValue> = IndexMap::with_capacity(outcomes.len());
        let mut errors: IndexMap<String, String> = IndexMap::new();

        for (field, outcome) in outcomes {
            match outcome {
                Ok(value) => {
                    self.observer.on_event(&ExtractionEvent::FieldExtracted {
                        field: field.to_string(),
                        value: value.clone(),
                    });
                    values.insert(field, value);
                }
                Err(e) => {
                    let message = format!("Failed to extract {}: {}", field, e);
                    self.observer.on_event(&ExtractionEvent::FieldFailed {
                        field: field.to_string(),
                        message: message.clone(),
                    });
                    errors.insert(field.to_string(), message);
                    values.insert(field, FieldValue::empty_for(field));
                }
            }
        }

        self.observer.on_event(&ExtractionEvent::Finished {
            failed: errors.len(),
            partial: self.allow_partial,
        });

        if !errors.is_empty() && !self.allow_partial {
            return Err(ResumeError::FieldsFailed { errors });
        }

        let mut take = |field: &str| {
            values
                .swap_remove(field)
                .unwrap_or_else(|| FieldValue::empty_for(field))
        };
        let data = ResumeData::from_fields(
            take(NAME_FIELD),
            take(EMAIL_FIELD),
            take(SKILLS_FIELD),
            self.allow_partial,
        )
        .inspect_err(|e| tracing::error!("Failed to create resume data: {}", e))?;

        Ok(ExtractionReport { data, errors })
    }

    /// Extract a single field, bypassing aggregation.
    pub async fn extract_field(&self, field: &str, text: &str) -> ResumeResult<FieldValue> {
        let extractor = self.extractors.get(field).ok_or_else(|| {
            ResumeError::configuration(format!("No extractor configured for field: {}", field))
        })?;
        extractor.extract(text).await
    }
}

impl std::fmt::Debug for ResumeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeExtractor")
            .field("fields", &self.configured_fields())
            .field("allow_partial", &self.allow_partial)
            .finish()
    }
}
