//! PDF text extraction using pdf-extract.

use std::path::Path;

use async_trait::async_trait;
use vitae_core::{check_input, ErrorCode, FileParser, ResumeError, ResumeResult};

const PDF_EXTENSIONS: &[&str] = &[".pdf"];

/// PDF parser using the pdf-extract library.
///
/// Pages are decoded in order; pages that yield only whitespace are skipped
/// and the rest are joined with newlines. A document without pages parses to
/// an empty string. Decoding runs in `spawn_blocking` since pdf-extract is
/// synchronous and CPU-bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser.
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(content: Vec<u8>) -> ResumeResult<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(&content).map_err(|e| {
            ResumeError::unsupported(format!("Failed to parse PDF: {}", e), ErrorCode::FmtCorrupt)
        })?;

        let page_count = pages.len();
        let text = join_pages(pages);
        tracing::debug!(page_count, chars = text.len(), "Decoded PDF pages");
        Ok(text)
    }
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl FileParser for PdfParser {
    async fn parse(&self, path: &Path) -> ResumeResult<String> {
        check_input(path, PDF_EXTENSIONS)?;

        let content = tokio::fs::read(path).await?;
        let text = tokio::task::spawn_blocking(move || Self::extract_sync(content))
            .await
            .map_err(|e| {
                ResumeError::unsupported(
                    format!("PDF decoder aborted: {}", e),
                    ErrorCode::FmtCorrupt,
                )
            })?
            .inspect_err(|e| tracing::error!(path = %path.display(), "{}", e))?;

        tracing::info!(path = %path.display(), chars = text.len(), "Extracted text from PDF");
        Ok(text)
    }

    fn extensions(&self) -> &[&str] {
        PDF_EXTENSIONS
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = vec![
            "Jane Roe".to_string(),
            "  \n".to_string(),
            "jane@example.com".to_string(),
        ];
        assert_eq!(join_pages(pages), "Jane Roe\njane@example.com");
    }

    #[test]
    fn test_join_pages_no_pages() {
        assert_eq!(join_pages(Vec::new()), "");
    }

    #[test]
    fn test_pdf_parser_identity() {
        let parser = PdfParser::new();
        assert_eq!(parser.name(), "pdf-extract");
        assert_eq!(parser.extensions(), [".pdf"]);
    }
}
