use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::resolution::resolve_overlaps;
use super::label::Label;
use super::span::{ResolvedSpanSet, Span, SpanError};

/// Counters from candidate generation over one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCounters {
    pub dates_detected: usize,
    pub amounts_detected: usize,
    pub recognized_received: usize,
    pub recognized_accepted: usize,
    pub recognized_filtered: usize,
    pub recognized_unanchored: usize,
    pub malformed: usize,
}

impl GenerationCounters {
    pub fn candidates(&self) -> usize {
        self.dates_detected + self.amounts_detected + self.recognized_accepted
    }
}

/// Counters from overlap resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionCounters {
    pub considered: usize,
    pub accepted: usize,
    pub discarded_by_overlap: usize,
}

/// Counters from validation, normalization and deduplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounters {
    pub received: usize,
    pub rejected: usize,
    pub normalized: usize,
    pub normalization_fallbacks: usize,
    pub duplicates_dropped: usize,
    pub emitted: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCounters {
    pub generation: GenerationCounters,
    pub resolution: ResolutionCounters,
    pub entities: EntityCounters,
}

/// Metadata describing one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub document_id: String,
    pub document_version: String,
    pub text_length: usize,
    pub entities_found: usize,
    pub entities_by_type: BTreeMap<Label, usize>,
    pub counters: PipelineCounters,
}

/// The final result of inference mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub entities: Vec<Entity>,
    pub metadata: ExtractionMetadata,
}

/// One line of a training corpus: `{"text": ..., "label": [[start, end, "LABEL"], ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub text: String,
    pub label: ResolvedSpanSet,
}

/// Spans dropped while aligning a loaded record with its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentCounters {
    pub empty: usize,
    pub out_of_bounds: usize,
    pub overlapping: usize,
}

impl AlignmentCounters {
    pub fn dropped(&self) -> usize {
        self.empty + self.out_of_bounds + self.overlapping
    }

    pub fn add(&mut self, other: AlignmentCounters) {
        self.empty += other.empty;
        self.out_of_bounds += other.out_of_bounds;
        self.overlapping += other.overlapping;
    }
}

impl TrainingRecord {
    pub fn new(text: String, label: ResolvedSpanSet) -> Self {
        Self { text, label }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check every span against the text length and the ordering invariant.
    pub fn validate(&self) -> Result<(), SpanError> {
        let len = self.char_len();
        for span in &self.label {
            span.check_bounds(len)?;
        }
        debug_assert!(self.label.is_well_formed());
        Ok(())
    }

    /// Rebuild a record from unchecked spans: drop those that do not fit the
    /// text, then settle overlaps with the same resolver the pipelines use.
    pub fn aligned(text: String, spans: Vec<Span>) -> (Self, AlignmentCounters) {
        let len = text.chars().count();
        let mut counters = AlignmentCounters::default();

        let in_bounds: Vec<Span> = spans
            .into_iter()
            .filter(|span| {
                let fits = span.check_bounds(len).is_ok();
                if !fits {
                    counters.out_of_bounds += 1;
                }
                fits
            })
            .collect();

        let resolution = resolve_overlaps(in_bounds);
        counters.overlapping = resolution.counters.discarded_by_overlap;

        (
            TrainingRecord {
                text,
                label: resolution.spans,
            },
            counters,
        )
    }
}
