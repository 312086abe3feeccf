//! File parser capability.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{ErrorCode, ResumeError, ResumeResult};

/// Derives plain text from a document on disk.
///
/// Implementations fail with `NotFound` when the path is not an existing
/// file, and with `UnsupportedFormat` when the extension does not match the
/// parser or the content cannot be decoded.
#[async_trait]
pub trait FileParser: Send + Sync {
    /// Extract text content from the file at `path`.
    async fn parse(&self, path: &Path) -> ResumeResult<String>;

    /// Lower-case extensions (with leading dot) this parser accepts.
    fn extensions(&self) -> &[&str];

    /// Human-readable name for this parser.
    fn name(&self) -> &str;
}

/// Lower-cased extension of `path` including the leading dot, if any.
pub fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Check that `path` is an existing file whose extension is one of `accepted`.
pub fn check_input(path: &Path, accepted: &[&str]) -> ResumeResult<()> {
    if !path.is_file() {
        tracing::error!(path = %path.display(), "Input file not found");
        return Err(ResumeError::not_found(path));
    }

    let extension = normalized_extension(path).unwrap_or_default();
    if !accepted.contains(&extension.as_str()) {
        tracing::error!(path = %path.display(), extension = %extension, "Invalid file extension");
        return Err(ResumeError::unsupported(
            format!(
                "Expected {} file, got {}",
                accepted.join(" or "),
                if extension.is_empty() { "no extension" } else { &extension }
            ),
            ErrorCode::FmtMismatch,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_normalized_extension() {
        assert_eq!(normalized_extension(Path::new("cv.PDF")).as_deref(), Some(".pdf"));
        assert_eq!(normalized_extension(Path::new("a/b/cv.tar.docx")).as_deref(), Some(".docx"));
        assert_eq!(normalized_extension(Path::new("resume")), None);
        assert_eq!(normalized_extension(Path::new(".bashrc")), None);
    }

    #[test]
    fn test_check_input_missing_file() {
        let err = check_input(Path::new("/definitely/not/here.pdf"), &[".pdf"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_check_input_wrong_extension() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let err = check_input(file.path(), &[".pdf"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FmtMismatch);
        assert!(err.to_string().contains("Expected .pdf file, got .txt"));
    }

    #[test]
    fn test_check_input_accepts_uppercase_extension() {
        let file = tempfile::Builder::new().suffix(".DOCX").tempfile().unwrap();
        assert!(check_input(file.path(), &[".docx", ".doc"]).is_ok());
    }
}
