//! vitae-parsers - Document parsers for resume ingestion.
//!
//! Provides [`FileParser`](vitae_core::FileParser) implementations for PDF
//! and Word documents and the [`ParserFactory`] that picks one by file
//! extension.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `docx` (default) - Word text extraction via docx-rs
//!
//! # Example
//!
//! ```ignore
//! use vitae_parsers::ParserFactory;
//!
//! let factory = ParserFactory::new();
//! let parser = factory.get_parser("resume.pdf")?;
//! let text = parser.parse(Path::new("resume.pdf")).await?;
//! ```

mod factory;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

pub use factory::{constructor, ParserConstructor, ParserFactory};

#[cfg(feature = "pdf")]
pub use pdf::PdfParser;

#[cfg(feature = "docx")]
pub use docx::WordParser;
