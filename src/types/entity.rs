use serde::{Deserialize, Serialize};

use super::label::Label;

/// A final, canonicalized entity.
///
/// `original_text` carries the trimmed surface form only when normalization
/// changed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
            original_text: None,
        }
    }

    pub(crate) fn from_normalized(surface: &str, canonical: String, label: Label) -> Self {
        let original_text = if canonical == surface {
            None
        } else {
            Some(surface.to_string())
        };

        Self {
            text: canonical,
            label,
            original_text,
        }
    }

    /// Deduplication key: lowercased canonical text plus label.
    pub fn dedup_key(&self) -> (String, Label) {
        (self.text.to_lowercase(), self.label)
    }
}

/// One item of recognizer output.
///
/// `label` is the recognizer's own category name (ORG, PERSON, GPE, or a
/// contract label). `start`/`end` are char offsets when the recognizer
/// reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl RecognizedEntity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start: None,
            end: None,
        }
    }

    pub fn at(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

impl<T: Into<String>, L: Into<String>> From<(T, L)> for RecognizedEntity {
    fn from((text, label): (T, L)) -> Self {
        RecognizedEntity::new(text, label)
    }
}
