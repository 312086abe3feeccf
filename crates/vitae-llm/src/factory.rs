//! Factory for creating LLM providers.

use std::sync::Arc;

use vitae_core::{Llm, LlmConfig, LlmProvider, LlmProviderConfig, ResumeResult};

use crate::gemini::GeminiLlm;
use crate::ollama::OllamaLlm;
use crate::openai::OpenAIProvider;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM provider from the given configuration.
    pub fn create(provider: LlmProvider, config: LlmConfig) -> ResumeResult<Arc<dyn Llm>> {
        tracing::debug!(provider = %provider, model = %config.model, "Creating LLM provider");
        match provider {
            LlmProvider::OpenAI => Ok(Arc::new(OpenAIProvider::new(config)?)),
            LlmProvider::Gemini => Ok(Arc::new(GeminiLlm::new(config)?)),
            LlmProvider::Ollama => Ok(Arc::new(OllamaLlm::new(config)?)),
        }
    }

    /// Create an LLM provider from a provider configuration.
    pub fn from_config(config: &LlmProviderConfig) -> ResumeResult<Arc<dyn Llm>> {
        let mut llm_config = config.config.clone();
        llm_config.api_key = config.resolved_api_key();
        Self::create(config.provider, llm_config)
    }

    /// Same provider and credentials as `config`, with a different model.
    pub fn with_model(
        config: &LlmProviderConfig,
        model: impl Into<String>,
    ) -> ResumeResult<Arc<dyn Llm>> {
        let mut config = config.clone();
        config.config.model = model.into();
        Self::from_config(&config)
    }

    /// Create a Gemini LLM provider with a specific model.
    pub fn gemini_with_model(model: impl Into<String>) -> ResumeResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::Gemini, config)
    }

    /// Create an OpenAI LLM provider with a specific model.
    pub fn openai_with_model(model: impl Into<String>) -> ResumeResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::OpenAI, config)
    }

    /// Create an Ollama LLM provider with a specific model.
    pub fn ollama_with_model(model: impl Into<String>) -> ResumeResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::Ollama, config)
    }
}
