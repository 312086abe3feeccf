//! Cleaning and decoding of LLM replies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use vitae_core::{ErrorCode, ResumeError, ResumeResult};

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_-]*\s*\n?([\s\S]*?)\n?\s*```").expect("valid regex"));

static THINK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));

/// Strip reasoning tags and markdown code fences from an LLM reply.
///
/// When the reply contains a fenced block anywhere, only the block content is
/// kept.
pub fn strip_code_fences(content: &str) -> String {
    let content = THINK_TAGS.replace_all(content, "");
    let content = content.trim();

    match FENCED_BLOCK.captures(content).and_then(|caps| caps.get(1)) {
        Some(block) => block.as_str().trim().to_string(),
        None => content.to_string(),
    }
}

/// Decode JSON, retrying once with common LLM mistakes repaired
/// (single quotes, trailing commas).
pub fn parse_lenient<T: DeserializeOwned>(json: &str) -> ResumeResult<T> {
    match serde_json::from_str(json) {
        Ok(value) => Ok(value),
        Err(e) => {
            let fixed = json
                .replace('\'', "\"")
                .replace(",]", "]")
                .replace(", ]", "]")
                .replace(",}", "}")
                .replace(", }", "}");
            serde_json::from_str(&fixed)
                .map_err(|_| ResumeError::parse(format!("Failed to parse LLM JSON: {}", e)))
        }
    }
}

/// Decode a skills reply into trimmed, non-blank skill strings.
///
/// The reply must be a JSON array once fences are removed; entries that are
/// not strings or are blank are dropped.
pub fn parse_skills(content: &str) -> ResumeResult<Vec<String>> {
    let cleaned = strip_code_fences(content);
    let value: serde_json::Value = parse_lenient(&cleaned).map_err(|e| {
        ResumeError::extraction_with_code(
            format!("Skills response is not valid JSON: {}", e),
            ErrorCode::ExtInvalidResponse,
        )
    })?;

    let items = value.as_array().ok_or_else(|| {
        ResumeError::extraction_with_code(
            "Skills response is not a JSON array",
            ErrorCode::ExtInvalidResponse,
        )
    })?;

    Ok(items
        .iter()
        .filter_map(|item| item.as_str())
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect())
}
