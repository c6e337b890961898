use serde::Serialize;
use thiserror::Error;

use super::char_index::CharIndex;
use crate::types::identifiers::{DocumentId, DocumentVersion};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Contract text must be valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// A contract's OCR text. Immutable once ingested: every span produced for it
/// indexes into `text` by char offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractDocument {
    id: DocumentId,
    version: DocumentVersion,
    text: String,
    #[serde(skip)]
    index: CharIndex,
}

impl ContractDocument {
    pub fn new(id: DocumentId, text: String) -> Self {
        let version = DocumentVersion::from_content(text.as_bytes());
        let index = CharIndex::new(&text);

        ContractDocument {
            id,
            version,
            text,
            index,
        }
    }

    /// Ingest raw OCR output bytes.
    pub fn ingest(id: DocumentId, raw_text: Vec<u8>) -> Result<Self, DocumentError> {
        let text = String::from_utf8(raw_text)?;
        Ok(ContractDocument::new(id, text))
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn version(&self) -> &DocumentVersion {
        &self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in chars, the unit of every span offset.
    pub fn char_len(&self) -> usize {
        self.index.char_len()
    }

    pub fn index(&self) -> &CharIndex {
        &self.index
    }

    /// Text covered by the char range `[start, end)`, if it lies inside the document.
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        let range = self.index.byte_range(start, end)?;
        self.text.get(range)
    }

    /// Mean length of whitespace-separated words. Garbled OCR output has a low mean.
    pub fn mean_word_length(&self) -> f64 {
        let (words, chars) = self
            .text
            .split_whitespace()
            .fold((0usize, 0usize), |(w, c), word| (w + 1, c + word.chars().count()));

        if words == 0 {
            0.0
        } else {
            chars as f64 / words as f64
        }
    }
}
