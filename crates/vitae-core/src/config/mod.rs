//! Configuration system for vitae.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{ResumeError, ResumeResult};
use crate::traits::LlmConfig;

/// LLM provider type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LlmProvider {
    OpenAI,
    #[default]
    Gemini,
    Ollama,
}

impl LlmProvider {
    /// Environment variable the provider reads its API key from.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Ollama => None,
        }
    }

    /// Whether the provider can run without an API key.
    pub fn requires_api_key(&self) -> bool {
        self.api_key_env().is_some()
    }
}

/// Provider configuration with type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Provider type.
    pub provider: LlmProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: LlmConfig,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            config: LlmConfig {
                model: "gemini-2.0-flash".to_string(),
                ..Default::default()
            },
        }
    }
}

impl LlmProviderConfig {
    /// API key from config, falling back to the provider's own variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.provider
                    .api_key_env()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|k| !k.trim().is_empty())
            })
    }

    /// Whether an LLM can be constructed from this configuration.
    pub fn is_available(&self) -> bool {
        !self.provider.requires_api_key() || self.resolved_api_key().is_some()
    }
}

/// Configuration for the field extractors and the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Model used for entity recognition in name extraction. When unset,
    /// the `llm` model is used on the same provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ner_model: Option<String>,
    /// LLM used for skills extraction.
    pub llm: LlmProviderConfig,
    /// Fall back to keyword matching when the LLM is missing or fails.
    pub use_skills_fallback: bool,
    /// Custom regex for email extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_pattern: Option<String>,
    /// Time budget for each LLM call, in seconds.
    pub llm_timeout_secs: u64,
    /// How much of the resume head is searched for the candidate name.
    pub name_window_chars: usize,
    /// How much resume text is embedded in the skills prompt.
    pub skills_prompt_chars: usize,
    /// Default failed fields instead of failing the whole extraction.
    pub allow_partial: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            ner_model: None,
            llm: LlmProviderConfig::default(),
            use_skills_fallback: true,
            email_pattern: None,
            llm_timeout_secs: 30,
            name_window_chars: 500,
            skills_prompt_chars: 2000,
            allow_partial: false,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> ResumeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ResumeError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ResumeError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| ResumeError::Configuration(e.to_string())),
            _ => Err(ResumeError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(provider) = env_parse::<LlmProvider>("VITAE_LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(model) = std::env::var("VITAE_LLM_MODEL") {
            config.llm.config.model = model;
        }
        if let Ok(api_key) = std::env::var("VITAE_LLM_API_KEY") {
            config.llm.config.api_key = Some(api_key);
        }
        if let Ok(base_url) = std::env::var("VITAE_LLM_BASE_URL") {
            config.llm.config.base_url = Some(base_url);
        }
        if let Ok(model) = std::env::var("VITAE_NER_MODEL") {
            config.ner_model = Some(model);
        }
        if let Some(enabled) = env_flag("VITAE_SKILLS_FALLBACK") {
            config.use_skills_fallback = enabled;
        }
        if let Ok(pattern) = std::env::var("VITAE_EMAIL_PATTERN") {
            config.email_pattern = Some(pattern);
        }
        if let Some(secs) = env_parse::<u64>("VITAE_LLM_TIMEOUT_SECS") {
            config.llm_timeout_secs = secs;
        }
        if let Some(enabled) = env_flag("VITAE_ALLOW_PARTIAL") {
            config.allow_partial = enabled;
        }

        if !config.llm.is_available() {
            tracing::warn!(
                provider = %config.llm.provider,
                "No LLM API key configured. Skills extraction will use keyword fallback only \
                 and name extraction will rely on the first-line heuristic."
            );
        }

        config
    }

    /// Provider configuration for entity recognition: the `llm` settings
    /// with `ner_model` substituted when one is set.
    pub fn ner_llm_config(&self) -> LlmProviderConfig {
        let mut config = self.llm.clone();
        if let Some(model) = self.ner_model.as_deref().filter(|m| !m.trim().is_empty()) {
            config.config.model = model.to_string();
        }
        config
    }

    /// Time budget for each LLM call.
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::default()
    }
}

fn env_parse<T: FromStr>(var: &str) -> Option<T> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var, value = %raw, "Ignoring unparseable environment variable");
            None
        }
    }
}

fn env_flag(var: &str) -> Option<bool> {
    let raw = std::env::var(var).ok()?;
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(var, value = %raw, "Ignoring unparseable boolean flag");
            None
        }
    }
}

/// Builder for ExtractorConfig.
#[derive(Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Set the NER model identifier.
    pub fn ner_model(mut self, model: impl Into<String>) -> Self {
        self.config.ner_model = Some(model.into());
        self
    }

    /// Set LLM configuration.
    pub fn llm(mut self, config: LlmProviderConfig) -> Self {
        self.config.llm = config;
        self
    }

    /// Set the LLM API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.llm.config.api_key = Some(api_key.into());
        self
    }

    /// Enable or disable the skills keyword fallback.
    pub fn use_skills_fallback(mut self, enabled: bool) -> Self {
        self.config.use_skills_fallback = enabled;
        self
    }

    /// Set a custom email pattern.
    pub fn email_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.email_pattern = Some(pattern.into());
        self
    }

    /// Set the LLM call timeout.
    pub fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.config.llm_timeout_secs = timeout.as_secs();
        self
    }

    /// Enable or disable partial extraction.
    pub fn allow_partial(mut self, enabled: bool) -> Self {
        self.config.allow_partial = enabled;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}
