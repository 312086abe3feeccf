//! Error types for vitae operations.
//!
//! Every fallible operation in the workspace returns [`ResumeResult`]. Variants
//! carry a structured [`ErrorCode`] for programmatic handling and map onto a
//! coarse [`ErrorKind`] that callers can match on without caring which crate
//! produced the error.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

/// Result type alias for vitae operations.
pub type ResumeResult<T> = Result<T, ResumeError>;

/// Main error type for all vitae operations.
#[derive(Error, Debug)]
pub enum ResumeError {
    /// Input file does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Unknown or missing extension, mismatched parser, or undecodable document.
    #[error("Unsupported format: {message}")]
    UnsupportedFormat { message: String, code: ErrorCode },

    /// Blank text handed to a parser, extractor or the coordinator.
    #[error("Empty input: {message}")]
    EmptyInput { message: String },

    /// A single field could not be produced.
    #[error("Extraction failed: {message}")]
    ExtractionFailed { message: String, code: ErrorCode },

    /// One or more fields failed while partial extraction was disabled.
    ///
    /// `errors` maps field name to message in the order fields were registered.
    #[error("Extraction failed: {}", join_messages(.errors))]
    FieldsFailed { errors: IndexMap<String, String> },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A `ResumeData` invariant was violated.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// An external LLM/NER collaborator failed.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_messages(errors: &IndexMap<String, String>) -> String {
    errors.values().map(String::as_str).collect::<Vec<_>>().join("; ")
}

/// Coarse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UnsupportedFormat,
    EmptyInput,
    ExtractionFailed,
    ConfigurationInvalid,
    ValidationFailed,
    Collaborator,
    Internal,
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // File (FILE_xxx)
    FileNotFound,

    // Format (FMT_xxx)
    FmtNoExtension,
    FmtUnsupported,
    FmtMismatch,
    FmtCorrupt,

    // Input (INP_xxx)
    InpEmpty,

    // Extraction (EXT_xxx)
    ExtNoMatch,
    ExtInvalidResponse,
    ExtTimeout,
    ExtFieldsFailed,

    // Configuration (CFG_xxx)
    CfgInvalid,

    // Validation (VAL_xxx)
    ValEmptyField,
    ValWrongType,

    // LLM (LLM_xxx)
    LlmConnectionFailed,
    LlmGenerationFailed,
    LlmInvalidResponse,

    // Parse (PARSE_xxx)
    ParseInvalidJson,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FileNotFound => "FILE_001",
            ErrorCode::FmtNoExtension => "FMT_001",
            ErrorCode::FmtUnsupported => "FMT_002",
            ErrorCode::FmtMismatch => "FMT_003",
            ErrorCode::FmtCorrupt => "FMT_004",
            ErrorCode::InpEmpty => "INP_001",
            ErrorCode::ExtNoMatch => "EXT_001",
            ErrorCode::ExtInvalidResponse => "EXT_002",
            ErrorCode::ExtTimeout => "EXT_003",
            ErrorCode::ExtFieldsFailed => "EXT_004",
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::ValEmptyField => "VAL_001",
            ErrorCode::ValWrongType => "VAL_002",
            ErrorCode::LlmConnectionFailed => "LLM_001",
            ErrorCode::LlmGenerationFailed => "LLM_002",
            ErrorCode::LlmInvalidResponse => "LLM_003",
            ErrorCode::ParseInvalidJson => "PARSE_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl ResumeError {
    /// Create a not found error.
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
            code,
        }
    }

    /// Create an empty input error.
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    /// Create an extraction error for a value that was not found.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            message: message.into(),
            code: ErrorCode::ExtNoMatch,
        }
    }

    /// Create an extraction error with a specific code.
    pub fn extraction_with_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::ExtractionFailed {
            message: message.into(),
            code,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::Validation {
            message: message.into(),
            code,
        }
    }

    /// Create an LLM error.
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmGenerationFailed,
            source: None,
        }
    }

    /// Create an LLM error with a specific code.
    pub fn llm_with_code(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::Llm {
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Create a parse error for malformed collaborator output.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::ParseInvalidJson,
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::FileNotFound,
            Self::UnsupportedFormat { code, .. } => *code,
            Self::EmptyInput { .. } => ErrorCode::InpEmpty,
            Self::ExtractionFailed { code, .. } => *code,
            Self::FieldsFailed { .. } => ErrorCode::ExtFieldsFailed,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            Self::Validation { code, .. } => *code,
            Self::Llm { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Get the coarse error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::EmptyInput { .. } => ErrorKind::EmptyInput,
            Self::ExtractionFailed { .. } | Self::FieldsFailed { .. } => {
                ErrorKind::ExtractionFailed
            }
            Self::Configuration(_) => ErrorKind::ConfigurationInvalid,
            Self::Validation { .. } => ErrorKind::ValidationFailed,
            Self::Llm { .. } => ErrorKind::Collaborator,
            Self::Io(_) | Self::Serialization(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Fields that failed, for aggregated extraction errors.
    pub fn failed_fields(&self) -> Vec<&str> {
        match self {
            Self::FieldsFailed { errors } => errors.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::NotFound { .. } => Some("Please check the file path and ensure the file exists"),
            Self::UnsupportedFormat { .. } => {
                Some("Please provide a PDF or Word document, or register a custom parser")
            }
            Self::FieldsFailed { .. } => {
                Some("Enable partial extraction to accept records with missing fields")
            }
            Self::Llm { .. } => Some("Please check your LLM provider configuration"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ResumeError::not_found("missing.pdf");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.code(), ErrorCode::FileNotFound);
        assert!(err.to_string().contains("missing.pdf"));
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_fields_failed_joins_messages_in_order() {
        let mut errors = IndexMap::new();
        errors.insert("name".to_string(), "Failed to extract name: boom".to_string());
        errors.insert("email".to_string(), "Failed to extract email: bang".to_string());
        let err = ResumeError::FieldsFailed { errors };

        assert_eq!(
            err.to_string(),
            "Extraction failed: Failed to extract name: boom; Failed to extract email: bang"
        );
        assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
        assert_eq!(err.failed_fields(), vec!["name", "email"]);
    }

    #[test]
    fn test_llm_error_is_collaborator_kind() {
        let err = ResumeError::llm("timeout");
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert_eq!(err.code().as_str(), "LLM_002");
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::FmtNoExtension.as_str(), "FMT_001");
        assert_eq!(ErrorCode::ValWrongType.as_str(), "VAL_002");
    }
}
