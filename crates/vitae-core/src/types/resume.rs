//! Resume record and per-field values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ResumeError, ResumeResult};

/// Field name for the candidate's name.
pub const NAME_FIELD: &str = "name";
/// Field name for the candidate's email address.
pub const EMAIL_FIELD: &str = "email";
/// Field name for the candidate's skills.
pub const SKILLS_FIELD: &str = "skills";

/// Fields every coordinator must be able to produce.
pub const REQUIRED_FIELDS: [&str; 3] = [NAME_FIELD, EMAIL_FIELD, SKILLS_FIELD];

/// Value produced by a single field extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar text (name, email, ...).
    Text(String),
    /// Ordered list of strings (skills, ...).
    List(Vec<String>),
}

impl FieldValue {
    /// Default value substituted when a field fails: an empty list for
    /// `skills`, an empty string for everything else.
    pub fn empty_for(field: &str) -> Self {
        if field == SKILLS_FIELD {
            Self::List(Vec::new())
        } else {
            Self::Text(String::new())
        }
    }

    /// Borrow the text value, if this is a text field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Borrow the list value, if this is a list field.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    /// Whether the value carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::List(v) => v.is_empty(),
        }
    }

    /// Human-readable type name, used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Structured data extracted from a resume.
///
/// Built once by the coordinator and immutable afterwards. Unless
/// `allow_partial` is set, `name` and `email` are guaranteed non-empty.
/// `allow_partial` is not serialized and does not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeData {
    name: String,
    email: String,
    skills: Vec<String>,
    #[serde(skip)]
    allow_partial: bool,
}

impl ResumeData {
    /// Create a validated record.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        skills: Vec<String>,
        allow_partial: bool,
    ) -> ResumeResult<Self> {
        let data = Self {
            name: name.into(),
            email: email.into(),
            skills,
            allow_partial,
        };
        data.validate()?;
        Ok(data)
    }

    /// Build a record from raw extractor outputs, checking value shapes.
    ///
    /// `skills` must be a list even in partial mode; `name` and `email`
    /// must be text.
    pub fn from_fields(
        name: FieldValue,
        email: FieldValue,
        skills: FieldValue,
        allow_partial: bool,
    ) -> ResumeResult<Self> {
        let skills = match skills {
            FieldValue::List(v) => v,
            other => {
                return Err(ResumeError::validation(
                    format!("skills must be a list, got {}", other.type_name()),
                    ErrorCode::ValWrongType,
                ))
            }
        };
        let name = expect_text(NAME_FIELD, name)?;
        let email = expect_text(EMAIL_FIELD, email)?;

        Self::new(name, email, skills, allow_partial)
    }

    fn validate(&self) -> ResumeResult<()> {
        if self.allow_partial {
            return Ok(());
        }
        if self.name.trim().is_empty() {
            return Err(ResumeError::validation(
                "name cannot be empty",
                ErrorCode::ValEmptyField,
            ));
        }
        if self.email.trim().is_empty() {
            return Err(ResumeError::validation(
                "email cannot be empty",
                ErrorCode::ValEmptyField,
            ));
        }
        Ok(())
    }

    /// Candidate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidate email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Skills in extraction order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Whether this record was built with partial extraction enabled.
    pub fn allow_partial(&self) -> bool {
        self.allow_partial
    }

    /// Convert to a `{name, email, skills}` mapping.
    pub fn to_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "email": self.email,
            "skills": self.skills,
        })
    }

    /// Serialize to pretty JSON (keys in the order name, email, skills;
    /// two-space indentation).
    pub fn to_json(&self) -> ResumeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PartialEq for ResumeData {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.email == other.email && self.skills == other.skills
    }
}

impl Eq for ResumeData {}

fn expect_text(field: &str, value: FieldValue) -> ResumeResult<String> {
    match value {
        FieldValue::Text(s) => Ok(s),
        other => Err(ResumeError::validation(
            format!("{} must be a string, got {}", field, other.type_name()),
            ErrorCode::ValWrongType,
        )),
    }
}

/// A resume record together with the per-field errors that were tolerated
/// while building it.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// The extracted record.
    pub data: ResumeData,
    /// Field name to error message, in field registration order.
    pub errors: IndexMap<String, String>,
}

impl ExtractionReport {
    /// True when every field extracted successfully.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of the fields that failed.
    pub fn failed_fields(&self) -> Vec<&str> {
        self.errors.keys().map(String::as_str).collect()
    }
}
