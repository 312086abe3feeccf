//! vitae-core - Core library for vitae.
//!
//! This crate provides the capability traits (field extractors, file
//! parsers, LLMs, entity recognizers), the validated [`ResumeData`] record
//! and the [`ResumeExtractor`] coordinator that aggregates per-field results.
//!
//! # Example
//!
//! ```ignore
//! use vitae_core::{ResumeExtractor, ExtractorConfig};
//!
//! let extractor = ResumeExtractor::new(
//!     [("name", name), ("email", email), ("skills", skills)],
//!     false,
//! )?;
//!
//! let data = extractor.extract("Jane Roe\njane@example.com").await?;
//! println!("{}", data.to_json()?);
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod observer;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{ExtractorConfig, ExtractorConfigBuilder, LlmProvider, LlmProviderConfig};
pub use coordinator::ResumeExtractor;
pub use error::{ErrorCode, ErrorKind, ResumeError, ResumeResult};
pub use observer::{ExtractionEvent, ExtractionObserver, TracingObserver};
pub use traits::{
    check_input, normalized_extension, EntityRecognizer, FieldExtractor, FileParser,
    GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat, TokenUsage,
};
pub use types::{
    Entity, ExtractionReport, FieldValue, Message, MessageRole, ResumeData, EMAIL_FIELD,
    NAME_FIELD, PERSON_LABEL, REQUIRED_FIELDS, SKILLS_FIELD,
};
