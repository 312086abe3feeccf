//! OpenAI LLM provider implementation.

use async_trait::async_trait;

use vitae_core::{
    ErrorCode, GenerationOptions, Llm, LlmConfig, LlmResponse, Message, ResumeError,
    ResumeResult,
};

#[cfg(feature = "openai")]
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
        ResponseFormat as OpenAIResponseFormat,
    },
    Client,
};
#[cfg(feature = "openai")]
use vitae_core::{MessageRole, ResponseFormat, TokenUsage};

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// OpenAI LLM provider.
pub struct OpenAIProvider {
    #[cfg(feature = "openai")]
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAIProvider {
    /// Create a new OpenAI LLM provider.
    pub fn new(config: LlmConfig) -> ResumeResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ResumeError::configuration(
                    "OpenAI API key not found. Set OPENAI_API_KEY or provide api_key in config.",
                )
            })?;

        #[cfg(feature = "openai")]
        let client = {
            let openai_config = OpenAIConfig::new().with_api_key(api_key);
            let openai_config = match config.base_url.as_deref() {
                Some(base_url) => openai_config.with_api_base(base_url),
                None => openai_config,
            };
            Client::with_config(openai_config)
        };
        #[cfg(not(feature = "openai"))]
        let _ = api_key;

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_OPENAI_MODEL.to_string();
        }

        Ok(Self {
            #[cfg(feature = "openai")]
            client,
            config,
        })
    }

    #[cfg(feature = "openai")]
    fn message_to_openai(msg: &Message) -> ChatCompletionRequestMessage {
        let content = msg.content.clone();
        match msg.role {
            MessageRole::System => {
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(content),
                    name: None,
                })
            }
            MessageRole::User => {
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(content),
                    name: None,
                })
            }
            MessageRole::Assistant => {
                ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                    content: Some(ChatCompletionRequestAssistantMessageContent::Text(content)),
                    ..Default::default()
                })
            }
        }
    }
}

#[async_trait]
impl Llm for OpenAIProvider {
    #[cfg(feature = "openai")]
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> ResumeResult<LlmResponse> {
        let options = options.unwrap_or_default();

        let mut request = CreateChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.iter().map(Self::message_to_openai).collect(),
            temperature: Some(options.temperature.unwrap_or(self.config.temperature)),
            top_p: Some(options.top_p.unwrap_or(self.config.top_p)),
            max_tokens: Some(options.max_tokens.unwrap_or(self.config.max_tokens)),
            ..Default::default()
        };
        if options.response_format == Some(ResponseFormat::Json) {
            request.response_format = Some(OpenAIResponseFormat::JsonObject);
        }

        tracing::debug!(model = %self.config.model, messages = messages.len(), "OpenAI request");

        let response = self.client.chat().create(request).await.map_err(|e| {
            ResumeError::llm_with_code(
                format!("OpenAI API error: {}", e),
                ErrorCode::LlmConnectionFailed,
            )
        })?;

        let choice = response.choices.first().ok_or_else(|| {
            ResumeError::llm_with_code("No response choices returned", ErrorCode::LlmInvalidResponse)
        })?;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LlmResponse {
            content: choice.message.content.clone(),
            usage,
        })
    }

    #[cfg(not(feature = "openai"))]
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> ResumeResult<LlmResponse> {
        Err(ResumeError::llm_with_code(
            "OpenAI feature not enabled. Enable the 'openai' feature.",
            ErrorCode::LlmConnectionFailed,
        ))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
