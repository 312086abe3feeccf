//! Skills extraction with an LLM and a keyword fallback.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use vitae_core::{ErrorCode, FieldExtractor, FieldValue, Llm, ResumeError, ResumeResult};

use crate::head_chars;
use crate::response::parse_skills;
use crate::vocabulary::match_known_skills;

/// Default amount of resume text embedded in the prompt.
pub const DEFAULT_PROMPT_CHARS: usize = 2000;

/// Build the skills prompt around the leading `limit` characters of `text`.
pub fn skills_prompt(text: &str, limit: usize) -> String {
    format!(
        "Extract all technical skills from this resume.\n\
         Return ONLY a JSON array of skills like: [\"Python\", \"Docker\", \"AWS\"]\n\
         \n\
         Resume: {}\n\
         \n\
         Skills:",
        head_chars(text, limit)
    )
}

/// Extracts technical skills.
///
/// With an LLM configured, the resume head is sent to it and the reply must
/// be a JSON array of strings. When the LLM is missing or fails and the
/// fallback is enabled, skills are matched against a fixed vocabulary instead.
#[derive(Clone)]
pub struct SkillsExtractor {
    llm: Option<Arc<dyn Llm>>,
    use_fallback: bool,
    prompt_chars: usize,
    timeout: Duration,
}

impl SkillsExtractor {
    /// Create an extractor. `llm` may be `None` for keyword matching only.
    pub fn new(llm: Option<Arc<dyn Llm>>) -> Self {
        Self {
            llm,
            use_fallback: true,
            prompt_chars: DEFAULT_PROMPT_CHARS,
            timeout: Duration::from_secs(30),
        }
    }

    /// Enable or disable the keyword fallback.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.use_fallback = enabled;
        self
    }

    /// Set how much resume text goes into the prompt.
    pub fn with_prompt_chars(mut self, chars: usize) -> Self {
        self.prompt_chars = chars;
        self
    }

    /// Set the LLM call budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn extract_with_llm(&self, llm: &dyn Llm, text: &str) -> ResumeResult<Vec<String>> {
        let prompt = skills_prompt(text, self.prompt_chars);

        let reply = tokio::time::timeout(self.timeout, llm.complete(&prompt))
            .await
            .map_err(|_| {
                ResumeError::extraction_with_code(
                    format!(
                        "Skills LLM call timed out after {}s",
                        self.timeout.as_secs_f32()
                    ),
                    ErrorCode::ExtTimeout,
                )
            })?
            .map_err(|e| {
                ResumeError::extraction_with_code(
                    format!("Skills LLM call failed: {}", e),
                    ErrorCode::ExtInvalidResponse,
                )
            })?;

        parse_skills(&reply)
    }
}

#[async_trait]
impl FieldExtractor for SkillsExtractor {
    async fn extract(&self, text: &str) -> ResumeResult<FieldValue> {
        if text.trim().is_empty() {
            return Err(ResumeError::empty_input("Cannot extract skills from empty text"));
        }

        match &self.llm {
            Some(llm) => match self.extract_with_llm(llm.as_ref(), text).await {
                Ok(skills) => {
                    tracing::debug!(model = llm.model_name(), count = skills.len(), "LLM skills");
                    return Ok(FieldValue::List(skills));
                }
                Err(e) if self.use_fallback => {
                    tracing::warn!("LLM skills extraction failed, using keyword fallback: {}", e);
                }
                Err(e) => return Err(e),
            },
            None if !self.use_fallback => {
                return Err(ResumeError::extraction(
                    "No LLM configured for skills extraction and keyword fallback is disabled",
                ));
            }
            None => {}
        }

        let skills = match_known_skills(text);
        tracing::debug!(count = skills.len(), "Keyword skills");
        Ok(FieldValue::List(skills))
    }

    fn name(&self) -> &str {
        if self.llm.is_some() {
            "skills-llm"
        } else {
            "skills-keywords"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use vitae_core::{ErrorKind, GenerationOptions, LlmResponse, Message};

    struct MockLlm {
        reply: ResumeResult<String>,
        delay: Duration,
        prompts: Mutex<Vec<String>>,
    }

    impl MockLlm {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(ResumeError::llm("quota exceeded")),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn slow() -> Arc<Self> {
            Arc::new(Self {
                reply: Ok("[\"Rust\"]".to_string()),
                delay: Duration::from_secs(5),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Llm for MockLlm {
        async fn generate(
            &self,
            messages: &[Message],
            _options: Option<GenerationOptions>,
        ) -> ResumeResult<LlmResponse> {
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.iter().map(|m| m.content.clone()));
            tokio::time::sleep(self.delay).await;
            match &self.reply {
                Ok(text) => Ok(LlmResponse {
                    content: Some(text.clone()),
                    usage: None,
                }),
                Err(_) => Err(ResumeError::llm("quota exceeded")),
            }
        }

        fn model_name(&self) -> &str {
            "mock"
        }
    }

    const RESUME: &str = "Jane Roe\nSenior engineer: Rust, Docker and Kubernetes.";

    #[tokio::test]
    async fn test_llm_reply_is_cleaned() {
        let llm = MockLlm::replying("```json\n[\"Rust\", \" Go \", 3, \"\"]\n```");
        let value = SkillsExtractor::new(Some(llm)).extract(RESUME).await.unwrap();
        assert_eq!(value, FieldValue::List(vec!["Rust".into(), "Go".into()]));
    }

    #[tokio::test]
    async fn test_prompt_is_bounded() {
        let llm = MockLlm::replying("[]");
        let text = format!("Jane Roe\n{}", "y".repeat(5000));
        SkillsExtractor::new(Some(llm.clone()))
            .extract(&text)
            .await
            .unwrap();

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Extract all technical skills from this resume."));
        assert!(prompts[0].ends_with("Skills:"));
        assert!(prompts[0].contains(&"y".repeat(1991)));
        assert!(!prompts[0].contains(&"y".repeat(1992)));
    }

    #[tokio::test]
    async fn test_empty_array_is_success() {
        let llm = MockLlm::replying("[]");
        let value = SkillsExtractor::new(Some(llm))
            .with_fallback(false)
            .extract(RESUME)
            .await
            .unwrap();
        assert_eq!(value, FieldValue::List(vec![]));
    }

    #[tokio::test]
    async fn test_non_array_reply_without_fallback_fails() {
        let llm = MockLlm::replying(r#"{"skills": []}"#);
        let err = SkillsExtractor::new(Some(llm))
            .with_fallback(false)
            .extract(RESUME)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
        assert_eq!(err.code(), ErrorCode::ExtInvalidResponse);
    }

    #[tokio::test]
    async fn test_non_array_reply_with_fallback_uses_keywords() {
        let llm = MockLlm::replying(r#"{"skills": []}"#);
        let value = SkillsExtractor::new(Some(llm)).extract(RESUME).await.unwrap();
        assert_eq!(
            value,
            FieldValue::List(vec!["Rust".into(), "Docker".into(), "Kubernetes".into()])
        );
    }

    #[tokio::test]
    async fn test_llm_error_is_extraction_failure() {
        let err = SkillsExtractor::new(Some(MockLlm::failing()))
            .with_fallback(false)
            .extract(RESUME)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_timeout_without_fallback() {
        let err = SkillsExtractor::new(Some(MockLlm::slow()))
            .with_fallback(false)
            .with_timeout(Duration::from_millis(20))
            .extract(RESUME)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ExtTimeout);
        assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
    }

    #[tokio::test]
    async fn test_timeout_with_fallback() {
        let value = SkillsExtractor::new(Some(MockLlm::slow()))
            .with_timeout(Duration::from_millis(20))
            .extract(RESUME)
            .await
            .unwrap();
        assert_eq!(value.as_list().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_no_llm_keyword_only() {
        let extractor = SkillsExtractor::new(None);
        assert_eq!(extractor.name(), "skills-keywords");
        let value = extractor.extract("Cooking and hiking").await.unwrap();
        assert_eq!(value, FieldValue::List(vec![]));
    }

    #[tokio::test]
    async fn test_no_llm_no_fallback_fails() {
        let err = SkillsExtractor::new(None)
            .with_fallback(false)
            .extract(RESUME)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
    }

    #[tokio::test]
    async fn test_blank_text() {
        let err = SkillsExtractor::new(None).extract("  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
    }
}
