//! Extraction observers.
//!
//! The coordinator reports progress through an injected [`ExtractionObserver`]
//! instead of logging directly. [`TracingObserver`] is the default and forwards
//! every event to `tracing`.

use crate::types::FieldValue;

/// Events emitted while a resume is being extracted.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    /// Extraction began for the listed fields.
    Started { fields: Vec<String> },
    /// A field produced a value.
    FieldExtracted { field: String, value: FieldValue },
    /// A field failed and was replaced by its default.
    FieldFailed { field: String, message: String },
    /// All fields were attempted.
    Finished { failed: usize, partial: bool },
}

impl ExtractionEvent {
    /// Get the event type as a string for filtering.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started { .. } => "extraction.started",
            Self::FieldExtracted { .. } => "extraction.field_extracted",
            Self::FieldFailed { .. } => "extraction.field_failed",
            Self::Finished { .. } => "extraction.finished",
        }
    }
}

/// Receives extraction events.
pub trait ExtractionObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &ExtractionEvent);
}

/// Observer that logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn on_event(&self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::Started { fields } => {
                tracing::info!(?fields, "Starting resume field extraction");
            }
            ExtractionEvent::FieldExtracted { field, value } => {
                tracing::info!(field = %field, ?value, "Successfully extracted field");
            }
            ExtractionEvent::FieldFailed { field, message } => {
                tracing::error!(field = %field, "{}", message);
            }
            ExtractionEvent::Finished { failed: 0, .. } => {
                tracing::info!("Resume data extraction completed successfully");
            }
            ExtractionEvent::Finished {
                failed,
                partial: true,
            } => {
                tracing::warn!(failed, "Partial extraction completed with errors");
            }
            ExtractionEvent::Finished { failed, .. } => {
                tracing::error!(failed, "Resume extraction failed");
            }
        }
    }
}
