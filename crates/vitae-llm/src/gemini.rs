//! Google Gemini LLM provider implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use vitae_core::{
    ErrorCode, GenerationOptions, Llm, LlmConfig, LlmResponse, Message, MessageRole,
    ResponseFormat, ResumeError, ResumeResult, TokenUsage,
};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Gemini LLM provider using the `generateContent` REST endpoint.
pub struct GeminiLlm {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

fn text_content(role: Option<&str>, text: &str) -> GeminiContent {
    GeminiContent {
        role: role.map(str::to_string),
        parts: vec![GeminiPart {
            text: Some(text.to_string()),
        }],
    }
}

impl GeminiLlm {
    /// Create a new Gemini LLM provider.
    pub fn new(config: LlmConfig) -> ResumeResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                ResumeError::configuration(
                    "Gemini API key not found. Set GEMINI_API_KEY or provide api_key in config.",
                )
            })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            api_key
                .parse()
                .map_err(|_| ResumeError::configuration("Invalid API key format"))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ResumeError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GEMINI_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_GEMINI_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn build_request(&self, messages: &[Message], options: &GenerationOptions) -> GeminiRequest {
        let system = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>();

        let contents = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| {
                let role = match m.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };
                text_content(Some(role), &m.content)
            })
            .collect();

        GeminiRequest {
            system_instruction: (!system.is_empty())
                .then(|| text_content(None, &system.join("\n\n"))),
            contents,
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature.unwrap_or(self.config.temperature),
                top_p: options.top_p.unwrap_or(self.config.top_p),
                max_output_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
                response_mime_type: (options.response_format == Some(ResponseFormat::Json))
                    .then_some("application/json"),
            },
        }
    }

    fn parse_response(body: &str) -> ResumeResult<LlmResponse> {
        let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
            ResumeError::llm_with_code(
                format!("Failed to parse Gemini response: {}", e),
                ErrorCode::LlmInvalidResponse,
            )
        })?;

        let content = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            });

        let usage = response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(LlmResponse { content, usage })
    }
}

#[async_trait]
impl Llm for GeminiLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> ResumeResult<LlmResponse> {
        let options = options.unwrap_or_default();
        let request = self.build_request(messages, &options);

        tracing::debug!(model = %self.config.model, messages = messages.len(), "Gemini request");

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.config.model
            ))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ResumeError::llm_with_code(
                    format!("Gemini API request failed: {}", e),
                    ErrorCode::LlmConnectionFailed,
                )
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResumeError::llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ResumeError::llm(format!(
                "Gemini API error ({}): {}",
                status, message
            )));
        }

        Self::parse_response(&body)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiLlm {
        GeminiLlm::new(LlmConfig {
            api_key: Some("test-key".to_string()),
            base_url: Some("http://localhost:9999/v1beta/".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let llm = provider();
        assert_eq!(llm.model_name(), DEFAULT_GEMINI_MODEL);
        assert_eq!(llm.base_url, "http://localhost:9999/v1beta");
    }

    #[test]
    fn test_request_shape() {
        let llm = provider();
        let messages = vec![
            Message::system("Be terse."),
            Message::user("List skills"),
            Message::assistant("[]"),
        ];
        let options = GenerationOptions {
            temperature: Some(0.0),
            response_format: Some(ResponseFormat::Json),
            ..Default::default()
        };

        let request = serde_json::to_value(llm.build_request(&messages, &options)).unwrap();
        assert_eq!(
            request["systemInstruction"]["parts"][0]["text"],
            "Be terse."
        );
        assert_eq!(request["contents"].as_array().unwrap().len(), 2);
        assert_eq!(request["contents"][0]["role"], "user");
        assert_eq!(request["contents"][1]["role"], "model");
        assert_eq!(
            request["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(request["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_plain_request_has_no_system_or_mime_type() {
        let request = serde_json::to_value(
            provider().build_request(&[Message::user("hi")], &GenerationOptions::default()),
        )
        .unwrap();
        assert!(request.get("systemInstruction").is_none());
        assert!(request["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "candidates": [{"content": {"role": "model", "parts": [{"text": "[\"Rust\","}, {"text": " \"Go\"]"}]}}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 5, "totalTokenCount": 17}
        }"#;
        let response = GeminiLlm::parse_response(body).unwrap();
        assert_eq!(response.content.as_deref(), Some("[\"Rust\", \"Go\"]"));
        assert_eq!(response.usage.unwrap().total_tokens, 17);
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let response = GeminiLlm::parse_response(r#"{"candidates": []}"#).unwrap();
        assert!(response.content.is_none());
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        let err = GeminiLlm::parse_response("<html>").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LlmInvalidResponse);
    }
}
