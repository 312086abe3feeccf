//! Ollama LLM provider implementation.

use async_trait::async_trait;

use vitae_core::{
    ErrorCode, GenerationOptions, Llm, LlmConfig, LlmResponse, Message, ResumeError,
    ResumeResult,
};

#[cfg(feature = "ollama")]
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage, MessageRole as OllamaRole},
    Ollama,
};
#[cfg(feature = "ollama")]
use vitae_core::{MessageRole, ResponseFormat};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";

/// Ollama LLM provider for locally served models.
pub struct OllamaLlm {
    #[cfg(feature = "ollama")]
    client: Ollama,
    config: LlmConfig,
}

impl OllamaLlm {
    /// Create a new Ollama LLM provider. No API key is needed.
    pub fn new(config: LlmConfig) -> ResumeResult<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

        let url = url::Url::parse(&base_url).map_err(|e| {
            ResumeError::configuration(format!("Invalid Ollama URL '{}': {}", base_url, e))
        })?;

        #[cfg(feature = "ollama")]
        let client = Ollama::new(
            format!("{}://{}", url.scheme(), url.host_str().unwrap_or("localhost")),
            url.port().unwrap_or(11434),
        );
        #[cfg(not(feature = "ollama"))]
        let _ = url;

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_OLLAMA_MODEL.to_string();
        }

        Ok(Self {
            #[cfg(feature = "ollama")]
            client,
            config,
        })
    }

    #[cfg(feature = "ollama")]
    fn message_to_ollama(msg: &Message) -> ChatMessage {
        let role = match msg.role {
            MessageRole::System => OllamaRole::System,
            MessageRole::User => OllamaRole::User,
            MessageRole::Assistant => OllamaRole::Assistant,
        };
        ChatMessage::new(role, msg.content.clone())
    }
}

#[async_trait]
impl Llm for OllamaLlm {
    #[cfg(feature = "ollama")]
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> ResumeResult<LlmResponse> {
        let options = options.unwrap_or_default();

        let mut ollama_messages: Vec<ChatMessage> =
            messages.iter().map(Self::message_to_ollama).collect();

        if options.response_format == Some(ResponseFormat::Json) {
            if let Some(last) = ollama_messages.last_mut() {
                last.content.push_str("\n\nPlease respond with valid JSON only.");
            }
        }

        tracing::debug!(model = %self.config.model, messages = messages.len(), "Ollama request");

        let request = ChatMessageRequest::new(self.config.model.clone(), ollama_messages);
        let response = self.client.send_chat_messages(request).await.map_err(|e| {
            ResumeError::llm_with_code(
                format!("Ollama API error: {}", e),
                ErrorCode::LlmConnectionFailed,
            )
        })?;

        Ok(LlmResponse {
            content: response.message.map(|m| m.content),
            usage: None,
        })
    }

    #[cfg(not(feature = "ollama"))]
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> ResumeResult<LlmResponse> {
        Err(ResumeError::llm_with_code(
            "Ollama feature not enabled. Enable the 'ollama' feature.",
            ErrorCode::LlmConnectionFailed,
        ))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
