//! The default field extractors driven through the coordinator.

use std::sync::Arc;

use async_trait::async_trait;
use vitae_core::{
    ErrorKind, ExtractorConfig, GenerationOptions, Llm, LlmResponse, Message, ResumeExtractor,
    ResumeResult,
};
use vitae_fields::ExtractorFactory;

/// Answers entity prompts with one PERSON and skills prompts with a list.
struct ScriptedLlm;

#[async_trait]
impl Llm for ScriptedLlm {
    async fn generate(
        &self,
        messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> ResumeResult<LlmResponse> {
        let prompt = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        let reply = if prompt.starts_with("Extract all technical skills") {
            r#"["Rust", "Tokio"]"#
        } else {
            r#"{"entities": [{"text": "Ada Lovelace", "label": "PERSON"}]}"#
        };
        Ok(LlmResponse {
            content: Some(reply.to_string()),
            usage: None,
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn test_default_extractors_read_name_and_email() {
    let config = ExtractorConfig::default();
    let extractors = ExtractorFactory::defaults(&config, None, None).unwrap();
    let coordinator = ResumeExtractor::new(extractors, false).unwrap();

    let data = coordinator
        .extract("John Doe\njohn@example.com")
        .await
        .unwrap();
    assert_eq!(data.name(), "John Doe");
    assert_eq!(data.email(), "john@example.com");
    assert!(data.skills().is_empty());
}

#[tokio::test]
async fn test_llm_backed_extractors() {
    let config = ExtractorConfig::default();
    let llm: Arc<dyn Llm> = Arc::new(ScriptedLlm);
    let extractors = ExtractorFactory::defaults(&config, Some(llm.clone()), Some(llm)).unwrap();
    let coordinator = ResumeExtractor::new(extractors, false).unwrap();

    let data = coordinator
        .extract("CURRICULUM VITAE\nAda Lovelace\nada@engine.org")
        .await
        .unwrap();
    assert_eq!(data.name(), "Ada Lovelace");
    assert_eq!(data.email(), "ada@engine.org");
    assert_eq!(data.skills(), ["Rust", "Tokio"]);
}

#[tokio::test]
async fn test_strict_mode_reports_missing_email() {
    let config = ExtractorConfig::default();
    let extractors = ExtractorFactory::defaults(&config, None, None).unwrap();
    let coordinator = ResumeExtractor::new(extractors, false).unwrap();

    let err = coordinator
        .extract("John Doe\nno contact details")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
    assert_eq!(err.failed_fields(), vec!["email"]);
}

#[tokio::test]
async fn test_partial_report_lists_failures_in_registration_order() {
    let config = ExtractorConfig::builder().allow_partial(true).build();
    let extractors = ExtractorFactory::defaults(&config, None, None).unwrap();
    let coordinator = ResumeExtractor::new(extractors, config.allow_partial).unwrap();

    let report = coordinator
        .extract_with_report("skills: docker, kubernetes")
        .await
        .unwrap();
    assert_eq!(report.failed_fields(), vec!["name", "email"]);
    assert_eq!(report.data.name(), "");
    assert_eq!(report.data.skills(), ["Docker", "Kubernetes"]);
}

#[tokio::test]
async fn test_extraction_is_idempotent() {
    let config = ExtractorConfig::default();
    let extractors = ExtractorFactory::defaults(&config, None, None).unwrap();
    let coordinator = ResumeExtractor::new(extractors, false).unwrap();

    let text = "Grace Hopper\ngrace@navy.mil\nCOBOL, Linux, Git";
    let first = coordinator.extract(text).await.unwrap();
    let second = coordinator.extract(text).await.unwrap();
    assert_eq!(first, second);
}
