//! Word document text extraction using docx-rs.

use std::path::Path;

use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};
use vitae_core::{check_input, ErrorCode, FileParser, ResumeError, ResumeResult};

const WORD_EXTENSIONS: &[&str] = &[".docx", ".doc"];

/// Word parser using the docx-rs library.
///
/// Body-level paragraphs and tables are visited in document order. Blank
/// paragraphs are dropped; each table contributes one line made of its
/// non-blank cell texts, row-major, joined with spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordParser;

impl WordParser {
    /// Create a new Word parser.
    pub fn new() -> Self {
        Self
    }

    /// Extract text synchronously (called within spawn_blocking).
    fn extract_sync(content: Vec<u8>) -> ResumeResult<String> {
        let docx = docx_rs::read_docx(&content).map_err(|e| {
            ResumeError::unsupported(
                format!("Failed to parse Word document: {}", e),
                ErrorCode::FmtCorrupt,
            )
        })?;

        let mut blocks: Vec<String> = Vec::new();

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let text = paragraph_text(p);
                    if !text.trim().is_empty() {
                        blocks.push(text);
                    }
                }
                DocumentChild::Table(t) => {
                    let text = table_text(t);
                    if !text.is_empty() {
                        blocks.push(text);
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(blocks = blocks.len(), "Decoded Word document");
        Ok(blocks.join("\n"))
    }
}

fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => push_run(&mut text, r),
            ParagraphChild::Hyperlink(h) => {
                for child in &h.children {
                    if let ParagraphChild::Run(r) = child {
                        push_run(&mut text, r);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run(text: &mut String, run: &docx_rs::Run) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

fn table_text(t: &docx_rs::Table) -> String {
    let mut cells: Vec<String> = Vec::new();

    for row in &t.rows {
        let TableChild::TableRow(r) = row;
        for cell in &r.cells {
            let TableRowChild::TableCell(c) = cell;
            let cell_text = c
                .children
                .iter()
                .filter_map(|content| match content {
                    TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            if !cell_text.trim().is_empty() {
                cells.push(cell_text.trim().to_string());
            }
        }
    }

    cells.join(" ")
}

#[async_trait]
impl FileParser for WordParser {
    async fn parse(&self, path: &Path) -> ResumeResult<String> {
        check_input(path, WORD_EXTENSIONS)?;

        let content = tokio::fs::read(path).await?;
        let text = tokio::task::spawn_blocking(move || Self::extract_sync(content))
            .await
            .map_err(|e| {
                ResumeError::unsupported(
                    format!("Word decoder aborted: {}", e),
                    ErrorCode::FmtCorrupt,
                )
            })?
            .inspect_err(|e| tracing::error!(path = %path.display(), "{}", e))?;

        tracing::info!(path = %path.display(), chars = text.len(), "Extracted text from Word document");
        Ok(text)
    }

    fn extensions(&self) -> &[&str] {
        WORD_EXTENSIONS
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}
