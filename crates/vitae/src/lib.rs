//! vitae - Resume parsing framework.
//!
//! [`ResumeParserFramework`] ties the pieces together: the
//! [`ParserFactory`] turns a document into text and the
//! [`ResumeExtractor`] turns text into a validated [`ResumeData`].
//!
//! # Example
//!
//! ```ignore
//! use vitae::{ExtractorConfig, ResumeParserFramework};
//!
//! let framework = ResumeParserFramework::new(ExtractorConfig::from_env())?;
//! let data = framework.parse_resume("resume.pdf").await?;
//! println!("{}", data.to_json()?);
//! ```

use std::path::Path;

use vitae_fields::ExtractorFactory;
use vitae_llm::LlmFactory;

pub use vitae_core::{
    ErrorCode, ErrorKind, ExtractionReport, ExtractorConfig, FieldExtractor, FieldValue,
    FileParser, LlmProvider, ResumeData, ResumeError, ResumeExtractor, ResumeResult,
};
pub use vitae_parsers::{constructor, ParserConstructor, ParserFactory};

/// Parses resume documents into [`ResumeData`].
#[derive(Debug)]
pub struct ResumeParserFramework {
    parser_factory: ParserFactory,
    extractor: ResumeExtractor,
}

impl ResumeParserFramework {
    /// Wire the default parsers and extractors from `config`.
    ///
    /// LLM-backed skills extraction and entity recognition are enabled only
    /// when the configured provider is usable; otherwise the keyword fallback
    /// and first-line heuristic are used.
    pub fn new(config: ExtractorConfig) -> ResumeResult<Self> {
        let (skills_llm, ner_llm) = if config.llm.is_available() {
            let skills_llm = LlmFactory::from_config(&config.llm)
                .inspect_err(|e| tracing::warn!("Skills LLM unavailable: {}", e))
                .ok();
            let ner_llm = LlmFactory::from_config(&config.ner_llm_config())
                .inspect_err(|e| tracing::warn!("NER model unavailable: {}", e))
                .ok();
            (skills_llm, ner_llm)
        } else {
            (None, None)
        };

        tracing::info!(
            provider = %config.llm.provider,
            skills_llm = skills_llm.is_some(),
            ner = ner_llm.is_some(),
            allow_partial = config.allow_partial,
            "Initializing resume parser"
        );

        let extractors = ExtractorFactory::defaults(&config, skills_llm, ner_llm)?;
        let extractor = ResumeExtractor::new(extractors, config.allow_partial)?;

        Ok(Self::with_components(ParserFactory::new(), extractor))
    }

    /// Build from configuration in the environment.
    pub fn from_env() -> ResumeResult<Self> {
        Self::new(ExtractorConfig::from_env())
    }

    /// Use a custom parser registry and coordinator.
    pub fn with_components(parser_factory: ParserFactory, extractor: ResumeExtractor) -> Self {
        Self {
            parser_factory,
            extractor,
        }
    }

    /// Parse a resume document and extract its fields.
    pub async fn parse_resume(&self, path: impl AsRef<Path>) -> ResumeResult<ResumeData> {
        let text = self.read_text(path.as_ref()).await?;
        self.extractor.extract(&text).await
    }

    /// Parse a resume document, also returning per-field errors tolerated in
    /// partial mode.
    pub async fn parse_resume_with_report(
        &self,
        path: impl AsRef<Path>,
    ) -> ResumeResult<ExtractionReport> {
        let text = self.read_text(path.as_ref()).await?;
        self.extractor.extract_with_report(&text).await
    }

    /// Extract fields from already-extracted text.
    pub async fn parse_text(&self, text: &str) -> ResumeResult<ResumeData> {
        self.extractor.extract(text).await
    }

    /// Registered document extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        self.parser_factory.supported_extensions()
    }

    /// The parser registry.
    pub fn parser_factory(&self) -> &ParserFactory {
        &self.parser_factory
    }

    /// The field coordinator.
    pub fn extractor(&self) -> &ResumeExtractor {
        &self.extractor
    }

    async fn read_text(&self, path: &Path) -> ResumeResult<String> {
        let parser = self.parser_factory.get_parser(path)?;
        let text = parser.parse(path).await?;
        tracing::debug!(path = %path.display(), parser = parser.name(), chars = text.len(), "Parsed document");
        Ok(text)
    }
}
