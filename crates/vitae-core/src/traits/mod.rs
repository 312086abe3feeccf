//! Core traits for vitae collaborators.

mod entity_recognizer;
mod field_extractor;
mod file_parser;
mod llm;

pub use entity_recognizer::*;
pub use field_extractor::*;
pub use file_parser::*;
pub use llm::*;
