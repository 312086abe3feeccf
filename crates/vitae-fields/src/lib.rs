//! vitae-fields - Field extractors for resume text.
//!
//! Provides the [`FieldExtractor`](vitae_core::FieldExtractor)
//! implementations used by the default pipeline:
//!
//! - [`EmailExtractor`] - first regex match in document order
//! - [`NameExtractor`] - first `PERSON` entity, else a first-line heuristic
//! - [`SkillsExtractor`] - LLM prompt with a keyword-vocabulary fallback
//!
//! plus [`LlmEntityRecognizer`], an entity recognizer backed by any
//! [`Llm`](vitae_core::Llm).
//!
//! # Example
//!
//! ```ignore
//! use vitae_fields::ExtractorFactory;
//!
//! let extractors = ExtractorFactory::defaults(&config, Some(llm.clone()), Some(llm))?;
//! let coordinator = ResumeExtractor::new(extractors, config.allow_partial)?;
//! ```

mod email;
mod factory;
mod name;
mod ner;
pub mod response;
pub mod vocabulary;
mod skills;

pub use email::{EmailExtractor, DEFAULT_EMAIL_PATTERN};
pub use factory::ExtractorFactory;
pub use name::{first_line_candidate, looks_like_name, NameExtractor, DEFAULT_NAME_WINDOW};
pub use ner::{normalize_label, LlmEntityRecognizer};
pub use skills::{skills_prompt, SkillsExtractor, DEFAULT_PROMPT_CHARS};

/// Leading `limit` characters of `text`, cut on a char boundary.
pub(crate) fn head_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
