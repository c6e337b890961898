use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::label::Label;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SpanError {
    #[error("Empty span: start {start} is not before end {end}")]
    Empty { start: usize, end: usize },

    #[error("Span end {end} exceeds document length {len}")]
    OutOfBounds { end: usize, len: usize },

    #[error("Span starting at {start} overlaps or precedes the span ending at {previous_end}")]
    Unordered { start: usize, previous_end: usize },
}

/// A labeled half-open `[start, end)` interval of char offsets.
///
/// Serialized as the `[start, end, "LABEL"]` triple used by training corpora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "(usize, usize, Label)", try_from = "(usize, usize, Label)")]
pub struct Span {
    start: usize,
    end: usize,
    label: Label,
}

/// Candidates are spans that have not been through conflict resolution yet.
pub type Candidate = Span;

impl Span {
    /// Build a span checked against the char length of its document.
    pub fn new(start: usize, end: usize, label: Label, doc_len: usize) -> Result<Self, SpanError> {
        let span = Span::unbounded(start, end, label)?;
        span.check_bounds(doc_len)?;
        Ok(span)
    }

    /// Build a span without a document at hand; only `start < end` is checked.
    pub fn unbounded(start: usize, end: usize, label: Label) -> Result<Self, SpanError> {
        if start >= end {
            return Err(SpanError::Empty { start, end });
        }
        Ok(Span { start, end, label })
    }

    pub fn check_bounds(&self, doc_len: usize) -> Result<(), SpanError> {
        if self.end > doc_len {
            return Err(SpanError::OutOfBounds {
                end: self.end,
                len: doc_len,
            });
        }
        Ok(())
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl From<Span> for (usize, usize, Label) {
    fn from(span: Span) -> Self {
        (span.start, span.end, span.label)
    }
}

impl TryFrom<(usize, usize, Label)> for Span {
    type Error = SpanError;

    fn try_from((start, end, label): (usize, usize, Label)) -> Result<Self, Self::Error> {
        Span::unbounded(start, end, label)
    }
}

/// Spans sorted by start and pairwise non-overlapping.
///
/// Only the overlap resolver and the corpus loader build these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Span>", try_from = "Vec<Span>")]
pub struct ResolvedSpanSet {
    spans: Vec<Span>,
}

impl ResolvedSpanSet {
    pub(crate) fn from_sorted(spans: Vec<Span>) -> Self {
        let set = ResolvedSpanSet { spans };
        debug_assert!(set.is_well_formed());
        set
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    pub fn into_vec(self) -> Vec<Span> {
        self.spans
    }

    /// Adjacent spans never overlap: `b.start >= a.end`.
    pub fn is_well_formed(&self) -> bool {
        self.spans.windows(2).all(|w| w[1].start >= w[0].end)
    }
}

impl From<ResolvedSpanSet> for Vec<Span> {
    fn from(set: ResolvedSpanSet) -> Self {
        set.spans
    }
}

impl TryFrom<Vec<Span>> for ResolvedSpanSet {
    type Error = SpanError;

    fn try_from(spans: Vec<Span>) -> Result<Self, Self::Error> {
        for pair in spans.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(SpanError::Unordered {
                    start: pair[1].start,
                    previous_end: pair[0].end,
                });
            }
        }
        Ok(ResolvedSpanSet { spans })
    }
}

impl<'a> IntoIterator for &'a ResolvedSpanSet {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}
