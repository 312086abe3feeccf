//! End-to-end tests for the resume parsing facade.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use docx_rs::{Docx, Paragraph, Run};
use tempfile::TempDir;
use vitae::{
    ErrorCode, ErrorKind, ExtractorConfig, FileParser, ParserFactory, ResumeExtractor,
    ResumeParserFramework, ResumeResult,
};
use vitae_fields::ExtractorFactory;

/// Reads any file as UTF-8 text.
#[derive(Default)]
struct PlainTextParser;

#[async_trait]
impl FileParser for PlainTextParser {
    async fn parse(&self, path: &Path) -> ResumeResult<String> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    fn extensions(&self) -> &[&str] {
        &[".txt"]
    }

    fn name(&self) -> &str {
        "plain-text"
    }
}

fn keyword_extractor(allow_partial: bool) -> ResumeExtractor {
    let config = ExtractorConfig::default();
    let extractors = ExtractorFactory::defaults(&config, None, None).unwrap();
    ResumeExtractor::new(extractors, allow_partial).unwrap()
}

fn framework_with_text_parser(allow_partial: bool) -> ResumeParserFramework {
    let mut factory = ParserFactory::new();
    factory.register_parser::<PlainTextParser>(".txt").unwrap();
    ResumeParserFramework::with_components(factory, keyword_extractor(allow_partial))
}

fn write_text(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn write_docx(path: &Path, lines: &[&str]) {
    let file = File::create(path).unwrap();
    lines
        .iter()
        .fold(Docx::new(), |doc, line| {
            doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)))
        })
        .build()
        .pack(file)
        .unwrap();
}

#[tokio::test]
async fn test_parses_custom_text_format() {
    let dir = TempDir::new().unwrap();
    let path = write_text(
        &dir,
        "resume.txt",
        "Jane Roe\njane.roe@example.org\nRust, Docker",
    );

    let framework = framework_with_text_parser(false);
    assert_eq!(
        framework.supported_extensions(),
        vec![".doc", ".docx", ".pdf", ".txt"]
    );

    let data = framework.parse_resume(&path).await.unwrap();
    assert_eq!(data.name(), "Jane Roe");
    assert_eq!(data.email(), "jane.roe@example.org");
    assert_eq!(data.skills(), ["Rust", "Docker"]);
}

#[tokio::test]
async fn test_parses_word_document_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("john.docx");
    write_docx(&path, &["John Doe", "", "john@example.com", "Python and Kubernetes"]);

    let framework = ResumeParserFramework::with_components(
        ParserFactory::new(),
        keyword_extractor(false),
    );
    let data = framework.parse_resume(&path).await.unwrap();

    assert_eq!(data.name(), "John Doe");
    assert_eq!(data.email(), "john@example.com");
    assert_eq!(data.skills(), ["Python", "Kubernetes"]);

    let json: serde_json::Value = serde_json::from_str(&data.to_json().unwrap()).unwrap();
    assert_eq!(json["email"], "john@example.com");
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected_before_reading() {
    let framework = framework_with_text_parser(false);
    let err = framework.parse_resume("resume.odt").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert_eq!(err.code(), ErrorCode::FmtUnsupported);
    assert!(err
        .to_string()
        .contains("Supported extensions: .doc, .docx, .pdf, .txt"));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let framework = ResumeParserFramework::with_components(
        ParserFactory::new(),
        keyword_extractor(false),
    );
    let err = framework
        .parse_resume(dir.path().join("gone.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_empty_document_is_empty_input() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "blank.txt", "  \n\t ");
    let err = framework_with_text_parser(true)
        .parse_resume(&path)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
}

#[tokio::test]
async fn test_strict_mode_reports_missing_email() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "noemail.txt", "Jane Roe\nRust");

    let err = framework_with_text_parser(false)
        .parse_resume(&path)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExtractionFailed);
    assert_eq!(err.failed_fields(), vec!["email"]);
}

#[tokio::test]
async fn test_partial_mode_returns_report() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "noemail.txt", "Jane Roe\nRust");

    let report = framework_with_text_parser(true)
        .parse_resume_with_report(&path)
        .await
        .unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.failed_fields(), vec!["email"]);
    assert_eq!(report.data.name(), "Jane Roe");
    assert_eq!(report.data.email(), "");
    assert_eq!(report.data.skills(), ["Rust"]);
    assert!(report.data.allow_partial());
}

#[tokio::test]
async fn test_custom_parser_overrides_default_pdf() {
    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "resume.pdf", "Ana Lima\nana@lima.dev\nScala");

    let factory = ParserFactory::with_parsers([(".PDF", vitae::constructor::<PlainTextParser>())])
        .unwrap();
    assert_eq!(factory.get_parser(&path).unwrap().name(), "plain-text");

    let framework = ResumeParserFramework::with_components(factory, keyword_extractor(false));
    let data = framework.parse_resume(&path).await.unwrap();
    assert_eq!(data.name(), "Ana Lima");
    assert_eq!(data.email(), "ana@lima.dev");
    assert_eq!(data.skills(), ["Scala"]);
}

#[tokio::test]
async fn test_closure_registration_shares_state() {
    let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut factory = ParserFactory::new();
    factory
        .register_parser_fn(
            ".md",
            Arc::new(move || {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Box::new(PlainTextParser) as Box<dyn FileParser>
            }),
        )
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = write_text(&dir, "cv.md", "Omar Haddad\nomar@haddad.io");
    let framework = ResumeParserFramework::with_components(factory, keyword_extractor(false));

    framework.parse_resume(&path).await.unwrap();
    framework.parse_resume(&path).await.unwrap();
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}
