//! LLM-backed named-entity recognition.
//!
//! The recognizer prompts an [`Llm`] for a JSON list of `{text, label}`
//! entities and normalises the labels. Replies wrapped in code fences or
//! with minor JSON mistakes are tolerated; anything else is reported as a
//! collaborator failure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use vitae_core::{
    Entity, EntityRecognizer, ErrorCode, GenerationOptions, Llm, Message, ResponseFormat,
    ResumeError, ResumeResult, PERSON_LABEL,
};

use crate::response::{parse_lenient, strip_code_fences};

const SYSTEM_PROMPT: &str = r#"You are a named-entity recognition system.
Find the named entities in the text and label each one as PERSON, ORG, LOC, DATE or MISC.

Output JSON in this exact format:
{"entities": [{"text": "entity text as written", "label": "PERSON"}]}

Rules:
1. List entities in the order they appear in the text
2. Copy entity text exactly as written
3. If no entities are found, return an empty array

Return ONLY valid JSON, no other text."#;

/// Raw JSON structures for LLM response parsing.
mod raw {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct RawEntity {
        #[serde(alias = "name", alias = "entity", alias = "value")]
        pub text: Option<String>,
        #[serde(alias = "type", alias = "entity_type", alias = "entityType")]
        pub label: Option<String>,
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReply {
    Wrapped { entities: Vec<raw::RawEntity> },
    Bare(Vec<raw::RawEntity>),
}

/// Entity recognizer that delegates to an LLM.
pub struct LlmEntityRecognizer {
    llm: Arc<dyn Llm>,
    timeout: Duration,
}

impl LlmEntityRecognizer {
    /// Create a recognizer over `llm` with a 30 second call budget.
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self {
            llm,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the per-call time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn parse_reply(content: &str) -> ResumeResult<Vec<Entity>> {
        let cleaned = strip_code_fences(content);
        if cleaned.is_empty() {
            return Err(ResumeError::llm_with_code(
                "Entity recognizer returned an empty response",
                ErrorCode::LlmInvalidResponse,
            ));
        }

        let raw = match parse_lenient::<RawReply>(&cleaned)? {
            RawReply::Wrapped { entities } | RawReply::Bare(entities) => entities,
        };

        Ok(raw.into_iter().filter_map(convert_entity).collect())
    }
}

fn convert_entity(raw: raw::RawEntity) -> Option<Entity> {
    let text = raw.text?.trim().to_string();
    if text.is_empty() {
        return None;
    }
    let label = normalize_label(raw.label.as_deref().unwrap_or("MISC"));
    Some(Entity::new(text, label))
}

/// Map label spellings used by different models onto upper-case labels.
pub fn normalize_label(label: &str) -> String {
    let upper = label.trim().to_uppercase();
    match upper.as_str() {
        "PER" | "PERSON" | "PEOPLE" | "HUMAN" | "NAME" => PERSON_LABEL.to_string(),
        "ORGANIZATION" | "ORGANISATION" | "COMPANY" => "ORG".to_string(),
        "LOCATION" | "GPE" | "PLACE" => "LOC".to_string(),
        _ => upper,
    }
}

#[async_trait]
impl EntityRecognizer for LlmEntityRecognizer {
    async fn entities(&self, text: &str) -> ResumeResult<Vec<Entity>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(format!("Extract named entities from this text:\n\n{}", text)),
        ];
        let options = GenerationOptions {
            temperature: Some(0.0),
            response_format: Some(ResponseFormat::Json),
            ..Default::default()
        };

        let response = tokio::time::timeout(self.timeout, self.llm.generate(&messages, Some(options)))
            .await
            .map_err(|_| {
                ResumeError::llm_with_code(
                    format!(
                        "Entity recognition timed out after {}s",
                        self.timeout.as_secs_f32()
                    ),
                    ErrorCode::LlmConnectionFailed,
                )
            })??;

        let entities = Self::parse_reply(response.content_or_empty())?;
        tracing::debug!(count = entities.len(), "Recognized entities");
        Ok(entities)
    }

    fn model_name(&self) -> &str {
        self.llm.model_name()
    }
}
