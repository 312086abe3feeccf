//! Regex-based email extraction.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use vitae_core::{FieldExtractor, FieldValue, ResumeError, ResumeResult};

/// Pattern used when no custom one is configured.
pub const DEFAULT_EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

static DEFAULT_EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_EMAIL_PATTERN).expect("valid regex"));

/// Extracts the first email address in document order.
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    pattern: Regex,
}

impl EmailExtractor {
    /// Create an extractor with the default pattern.
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_EMAIL_RE.clone(),
        }
    }

    /// Create an extractor with a custom pattern.
    pub fn with_pattern(pattern: &str) -> ResumeResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ResumeError::configuration(format!("Invalid email pattern '{}': {}", pattern, e))
        })?;
        Ok(Self { pattern })
    }

    /// Every match, in document order.
    pub fn extract_all(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldExtractor for EmailExtractor {
    async fn extract(&self, text: &str) -> ResumeResult<FieldValue> {
        if text.trim().is_empty() {
            return Err(ResumeError::empty_input("Cannot extract email from empty text"));
        }

        match self.pattern.find(text) {
            Some(m) => {
                tracing::debug!(email = m.as_str(), "Found email");
                Ok(FieldValue::from(m.as_str()))
            }
            None => Err(ResumeError::extraction("No email address found in text")),
        }
    }

    fn name(&self) -> &str {
        "email-regex"
    }
}
