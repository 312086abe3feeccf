//! Extension-keyed parser registry.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use vitae_core::{normalized_extension, ErrorCode, FileParser, ResumeError, ResumeResult};

#[cfg(feature = "docx")]
use crate::WordParser;

#[cfg(feature = "pdf")]
use crate::PdfParser;

/// Constructor producing a fresh parser instance.
pub type ParserConstructor = Arc<dyn Fn() -> Box<dyn FileParser> + Send + Sync>;

/// Registry mapping lower-cased file extensions (with leading dot) to parser
/// constructors.
///
/// Seeded with `.pdf`, `.docx` and `.doc`. Custom entries may overwrite the
/// defaults. Every lookup builds a fresh parser.
#[derive(Clone)]
pub struct ParserFactory {
    parsers: BTreeMap<String, ParserConstructor>,
}

impl ParserFactory {
    /// Create a factory with the default parsers.
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            parsers: BTreeMap::new(),
        };

        #[cfg(feature = "pdf")]
        factory.insert(".pdf", constructor::<PdfParser>());

        #[cfg(feature = "docx")]
        {
            factory.insert(".docx", constructor::<WordParser>());
            factory.insert(".doc", constructor::<WordParser>());
        }

        factory
    }

    /// Create a factory with the defaults plus custom entries, which take
    /// precedence on conflicting extensions.
    pub fn with_parsers<I, K>(custom: I) -> ResumeResult<Self>
    where
        I: IntoIterator<Item = (K, ParserConstructor)>,
        K: AsRef<str>,
    {
        let mut factory = Self::new();
        for (extension, ctor) in custom {
            factory.register_parser_fn(extension.as_ref(), ctor)?;
        }
        Ok(factory)
    }

    /// Register a parser type for an extension.
    pub fn register_parser<P>(&mut self, extension: &str) -> ResumeResult<()>
    where
        P: FileParser + Default + 'static,
    {
        self.register_parser_fn(extension, constructor::<P>())
    }

    /// Register a parser constructor for an extension.
    ///
    /// Fails when the extension does not start with `.` or has nothing
    /// after it.
    pub fn register_parser_fn(
        &mut self,
        extension: &str,
        ctor: ParserConstructor,
    ) -> ResumeResult<()> {
        if !extension.starts_with('.') || extension.len() < 2 {
            return Err(ResumeError::configuration(format!(
                "Extension must start with '.': {}",
                extension
            )));
        }

        let extension = extension.to_lowercase();
        tracing::info!(extension = %extension, "Registered parser");
        self.insert(&extension, ctor);
        Ok(())
    }

    fn insert(&mut self, extension: &str, ctor: ParserConstructor) {
        self.parsers.insert(extension.to_string(), ctor);
    }

    /// Resolve a parser for `path` by its extension.
    pub fn get_parser(&self, path: impl AsRef<Path>) -> ResumeResult<Box<dyn FileParser>> {
        let path = path.as_ref();
        let extension = normalized_extension(path).ok_or_else(|| {
            ResumeError::unsupported(
                format!("File has no extension: {}", path.display()),
                ErrorCode::FmtNoExtension,
            )
        })?;

        let ctor = self.parsers.get(&extension).ok_or_else(|| {
            ResumeError::unsupported(
                format!(
                    "Unsupported file type: {}. Supported extensions: {}",
                    extension,
                    self.supported_extensions().join(", ")
                ),
                ErrorCode::FmtUnsupported,
            )
        })?;

        let parser = ctor();
        tracing::debug!(extension = %extension, parser = parser.name(), "Selected parser");
        Ok(parser)
    }

    /// Registered extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        self.parsers.keys().cloned().collect()
    }

    /// Check whether a parser is registered for `extension` (case-insensitive).
    pub fn supports(&self, extension: &str) -> bool {
        self.parsers.contains_key(&extension.to_lowercase())
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParserFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserFactory")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

/// Constructor for a default-constructible parser type.
pub fn constructor<P>() -> ParserConstructor
where
    P: FileParser + Default + 'static,
{
    Arc::new(|| Box::new(P::default()) as Box<dyn FileParser>)
}
