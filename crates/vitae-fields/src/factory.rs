//! Factory for creating the default field extractors.

use std::sync::Arc;

use vitae_core::{
    EntityRecognizer, ExtractorConfig, FieldExtractor, Llm, ResumeResult, EMAIL_FIELD,
    NAME_FIELD, SKILLS_FIELD,
};

use crate::{EmailExtractor, LlmEntityRecognizer, NameExtractor, SkillsExtractor};

/// Factory for creating field extractors from configuration.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create the email extractor, honouring a custom pattern.
    pub fn email(config: &ExtractorConfig) -> ResumeResult<Arc<dyn FieldExtractor>> {
        let extractor = match config.email_pattern.as_deref() {
            Some(pattern) => EmailExtractor::with_pattern(pattern)?,
            None => EmailExtractor::new(),
        };
        Ok(Arc::new(extractor))
    }

    /// Create the name extractor. Without a recognizer only the first-line
    /// heuristic is used.
    pub fn name(
        config: &ExtractorConfig,
        recognizer: Option<Arc<dyn EntityRecognizer>>,
    ) -> Arc<dyn FieldExtractor> {
        let extractor = NameExtractor::new().with_window(config.name_window_chars);
        match recognizer {
            Some(recognizer) => Arc::new(extractor.with_recognizer(recognizer)),
            None => Arc::new(extractor),
        }
    }

    /// Create the skills extractor.
    pub fn skills(config: &ExtractorConfig, llm: Option<Arc<dyn Llm>>) -> Arc<dyn FieldExtractor> {
        Arc::new(
            SkillsExtractor::new(llm)
                .with_fallback(config.use_skills_fallback)
                .with_prompt_chars(config.skills_prompt_chars)
                .with_timeout(config.llm_timeout()),
        )
    }

    /// Create an LLM-backed entity recognizer.
    pub fn recognizer(config: &ExtractorConfig, llm: Arc<dyn Llm>) -> Arc<dyn EntityRecognizer> {
        Arc::new(LlmEntityRecognizer::new(llm).with_timeout(config.llm_timeout()))
    }

    /// Create the `name`, `email` and `skills` extractors, in that order.
    ///
    /// `skills_llm` drives skills extraction and `ner_llm` entity recognition;
    /// either may be absent.
    pub fn defaults(
        config: &ExtractorConfig,
        skills_llm: Option<Arc<dyn Llm>>,
        ner_llm: Option<Arc<dyn Llm>>,
    ) -> ResumeResult<Vec<(&'static str, Arc<dyn FieldExtractor>)>> {
        let recognizer = ner_llm.map(|llm| Self::recognizer(config, llm));
        Ok(vec![
            (NAME_FIELD, Self::name(config, recognizer)),
            (EMAIL_FIELD, Self::email(config)?),
            (SKILLS_FIELD, Self::skills(config, skills_llm)),
        ])
    }
}
