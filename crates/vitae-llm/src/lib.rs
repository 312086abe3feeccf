//! vitae-llm - LLM provider implementations for vitae.
//!
//! The skills extractor and the LLM-backed entity recognizer talk to a
//! [`Llm`]; this crate provides the concrete providers.
//!
//! # Supported Providers
//!
//! - **Gemini** - Google Gemini over the REST API (always available)
//! - **OpenAI** (feature: `openai`, default) - GPT-4o and friends
//! - **Ollama** (feature: `ollama`) - Local models via Ollama
//!
//! # Example
//!
//! ```ignore
//! use vitae_llm::LlmFactory;
//!
//! let llm = LlmFactory::gemini_with_model("gemini-2.0-flash")?;
//! let reply = llm.complete("Say hi").await?;
//! ```

mod factory;
mod gemini;
mod ollama;
mod openai;

pub use factory::LlmFactory;
pub use gemini::GeminiLlm;
pub use ollama::OllamaLlm;
pub use openai::OpenAIProvider;

// Re-export core types for convenience
pub use vitae_core::{GenerationOptions, Llm, LlmConfig, LlmProvider, LlmResponse, ResponseFormat};
