//! Candidate name extraction.

use std::sync::Arc;

use async_trait::async_trait;

use vitae_core::{EntityRecognizer, FieldExtractor, FieldValue, ResumeError, ResumeResult};

use crate::head_chars;

/// Default size of the resume head searched for the name.
pub const DEFAULT_NAME_WINDOW: usize = 500;

const TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " \u{2014} ", " \u{2013} "];

/// Extracts the candidate name from the top of a resume.
///
/// Only the first `window` characters are considered. The first `PERSON`
/// entity reported by the recognizer wins; otherwise the first non-blank line
/// is accepted if it looks like a name.
#[derive(Clone)]
pub struct NameExtractor {
    recognizer: Option<Arc<dyn EntityRecognizer>>,
    window: usize,
}

impl NameExtractor {
    /// Create an extractor that relies on the first-line heuristic only.
    pub fn new() -> Self {
        Self {
            recognizer: None,
            window: DEFAULT_NAME_WINDOW,
        }
    }

    /// Use an entity recognizer before the first-line heuristic.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Set how many leading characters are searched.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    async fn first_person(&self, head: &str) -> Option<String> {
        let recognizer = self.recognizer.as_ref()?;
        match recognizer.entities(head).await {
            Ok(entities) => entities
                .into_iter()
                .filter(|entity| entity.is_person())
                .map(|entity| entity.text.trim().to_string())
                .find(|text| !text.is_empty()),
            Err(e) => {
                tracing::warn!(
                    model = recognizer.model_name(),
                    "Entity recognition failed, using first-line heuristic: {}",
                    e
                );
                None
            }
        }
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// First non-blank line of `text` with any trailing job title removed.
pub fn first_line_candidate(text: &str) -> Option<String> {
    let mut line = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    for separator in TITLE_SEPARATORS {
        if let Some((head, _)) = line.split_once(separator) {
            line = head.trim();
        }
    }
    Some(line.to_string())
}

/// Whether `line` looks like a personal name: 2-4 whitespace-separated
/// tokens, each starting with an uppercase letter and free of digits.
pub fn looks_like_name(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&tokens.len()) {
        return false;
    }

    tokens.iter().all(|token| {
        token.chars().next().is_some_and(char::is_uppercase)
            && !token.chars().any(|c| c.is_ascii_digit())
    })
}

#[async_trait]
impl FieldExtractor for NameExtractor {
    async fn extract(&self, text: &str) -> ResumeResult<FieldValue> {
        if text.trim().is_empty() {
            return Err(ResumeError::empty_input("Cannot extract name from empty text"));
        }

        let head = head_chars(text, self.window);

        if let Some(name) = self.first_person(head).await {
            tracing::debug!(name = %name, "Name found by entity recognition");
            return Ok(FieldValue::from(name));
        }

        if let Some(line) = first_line_candidate(head) {
            if looks_like_name(&line) {
                tracing::debug!(name = %line, "Name found on first line");
                return Ok(FieldValue::from(line));
            }
        }

        Err(ResumeError::extraction("No candidate name found in resume header"))
    }

    fn name(&self) -> &str {
        "name-ner-heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vitae_core::{Entity, ErrorKind};

    struct MockRecognizer {
        entities: Vec<Entity>,
        seen_chars: AtomicUsize,
    }

    impl MockRecognizer {
        fn new(entities: Vec<Entity>) -> Self {
            Self {
                entities,
                seen_chars: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EntityRecognizer for MockRecognizer {
        async fn entities(&self, text: &str) -> ResumeResult<Vec<Entity>> {
            self.seen_chars.store(text.chars().count(), Ordering::SeqCst);
            Ok(self.entities.clone())
        }

        fn model_name(&self) -> &str {
            "mock-ner"
        }
    }

    struct BrokenRecognizer;

    #[async_trait]
    impl EntityRecognizer for BrokenRecognizer {
        async fn entities(&self, _: &str) -> ResumeResult<Vec<Entity>> {
            Err(ResumeError::llm("model unavailable"))
        }

        fn model_name(&self) -> &str {
            "broken-ner"
        }
    }

    #[test]
    fn test_looks_like_name() {
        assert!(looks_like_name("John Doe"));
        assert!(looks_like_name("Mary-Jane O'Neil"));
        assert!(looks_like_name("J. R. R. Tolkien"));
        assert!(!looks_like_name("John"));
        assert!(!looks_like_name("A B C D E"));
        assert!(!looks_like_name("john doe"));
        assert!(!looks_like_name("John Doe3"));
        assert!(!looks_like_name("Curriculum Vitae: 2024"));
    }

    #[test]
    fn test_looks_like_name_allows_punctuation() {
        assert!(looks_like_name("John Doe, PhD"));
        assert!(looks_like_name("Jane Roe (MBA)"));
        assert!(!looks_like_name("Jane R0e"));
    }

    #[tokio::test]
    async fn test_first_line_with_degree_suffix() {
        let value = NameExtractor::new()
            .extract("John Doe, PhD\njohn@example.com")
            .await
            .unwrap();
        assert_eq!(value, FieldValue::from("John Doe, PhD"));
    }

    #[test]
    fn test_first_line_candidate_strips_title() {
        assert_eq!(
            first_line_candidate("\n  Jane Roe - Software Engineer\nmore").as_deref(),
            Some("Jane Roe")
        );
        assert_eq!(
            first_line_candidate("Jane Roe | Data Scientist").as_deref(),
            Some("Jane Roe")
        );
        assert_eq!(
            first_line_candidate("Jane Roe \u{2014} Architect").as_deref(),
            Some("Jane Roe")
        );
        assert_eq!(first_line_candidate("   \n "), None);
    }

    #[tokio::test]
    async fn test_first_line_heuristic() {
        let value = NameExtractor::new()
            .extract("John Doe\njohn@example.com")
            .await
            .unwrap();
        assert_eq!(value, FieldValue::from("John Doe"));
    }

    #[tokio::test]
    async fn test_prefers_first_person_entity() {
        let recognizer = Arc::new(MockRecognizer::new(vec![
            Entity::new("Acme Corp", "ORG"),
            Entity::person("  Jane Roe "),
            Entity::person("John Smith"),
        ]));
        let value = NameExtractor::new()
            .with_recognizer(recognizer)
            .extract("RESUME\nJane Roe worked with John Smith at Acme Corp")
            .await
            .unwrap();
        assert_eq!(value, FieldValue::from("Jane Roe"));
    }

    #[tokio::test]
    async fn test_recognizer_sees_only_window() {
        let recognizer = Arc::new(MockRecognizer::new(vec![]));
        let text = format!("Jane Roe\n{}", "x".repeat(2000));
        NameExtractor::new()
            .with_recognizer(recognizer.clone())
            .with_window(100)
            .extract(&text)
            .await
            .unwrap();
        assert_eq!(recognizer.seen_chars.load(Ordering::SeqCst), 100);
    }

    #[tokio::test]
    async fn test_recognizer_failure_falls_back_to_first_line() {
        let value = NameExtractor::new()
            .with_recognizer(Arc::new(BrokenRecognizer))
            .extract("Jane Roe\njane@example.com")
            .await
            .unwrap();
        assert_eq!(value, FieldValue::from("Jane Roe"));
    }

    #[tokio::test]
    async fn test_no_name_found() {
        let err = NameExtractor::new()
            .with_recognizer(Arc::new(MockRecognizer::new(vec![Entity::new(
                "Acme", "ORG",
            )])))
            .extract("curriculum vitae\njane@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
    }

    #[tokio::test]
    async fn test_blank_text() {
        let err = NameExtractor::new().extract("\n\n").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }
}
