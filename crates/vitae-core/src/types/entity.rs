//! Named entities returned by an entity recognizer.

use serde::{Deserialize, Serialize};

/// Label used for people.
pub const PERSON_LABEL: &str = "PERSON";

/// A span of text tagged with an entity label (e.g. `PERSON`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text of the entity.
    pub text: String,
    /// Upper-case entity label.
    pub label: String,
}

impl Entity {
    /// Create a new entity.
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }

    /// Create a `PERSON` entity.
    pub fn person(text: impl Into<String>) -> Self {
        Self::new(text, PERSON_LABEL)
    }

    /// Whether this entity is tagged as a person.
    pub fn is_person(&self) -> bool {
        self.label == PERSON_LABEL
    }
}
