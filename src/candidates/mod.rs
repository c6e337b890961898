//! Candidate span generation.
//!
//! Dates and amounts come from pattern rules over the raw text; party names
//! and jurisdictions come from recognizer output after blacklist and shape
//! screening. Candidates may overlap; the resolver settles that.
//!
//! Recognizer candidates precede detector candidates in the output, so on an
//! exact interval tie the recognizer's label survives resolution.

pub mod amounts;
pub mod dates;
pub mod recognizer;

use std::ops::Range;

use crate::config::Configuration;
use crate::document::ContractDocument;
use crate::types::{Candidate, GenerationCounters, Label, RecognizedEntity, Span};

pub use recognizer::{anchor, clean_surface, screen, Anchor, Screening};

#[derive(Debug, Clone, Default)]
pub struct GeneratedCandidates {
    pub candidates: Vec<Candidate>,
    pub counters: GenerationCounters,
}

pub struct SpanCandidateGenerator<'c> {
    config: &'c Configuration,
}

impl<'c> SpanCandidateGenerator<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        document: &ContractDocument,
        recognized: &[RecognizedEntity],
    ) -> GeneratedCandidates {
        let mut counters = GenerationCounters::default();

        // 1. Pattern rules over the text
        let mut detected = Vec::new();
        for range in dates::find_dates(self.config, document.text()) {
            match self.place_match(document, range, Label::EffectiveDate) {
                Some(span) => {
                    detected.push(span);
                    counters.dates_detected += 1;
                }
                None => counters.malformed += 1,
            }
        }
        for range in amounts::find_amounts(self.config, document.text()) {
            match self.place_match(document, range, Label::TotalAmount) {
                Some(span) => {
                    detected.push(span);
                    counters.amounts_detected += 1;
                }
                None => counters.malformed += 1,
            }
        }

        // 2. Recognizer output, anchored clear of spans already placed
        let mut anchored = Vec::new();
        counters.recognized_received = recognized.len();
        for entity in recognized {
            let label = match screen(self.config, entity) {
                Screening::Accepted(label) => label,
                _ => {
                    counters.recognized_filtered += 1;
                    continue;
                }
            };

            let occupied = anchored.iter().chain(detected.iter());
            match anchor(document, entity, label, occupied) {
                Anchor::Placed(span) => {
                    anchored.push(span);
                    counters.recognized_accepted += 1;
                }
                Anchor::Malformed(_) => counters.malformed += 1,
                Anchor::NotFound => counters.recognized_unanchored += 1,
            }
        }

        anchored.extend(detected);
        GeneratedCandidates {
            candidates: anchored,
            counters,
        }
    }

    /// Labels accepted recognizer entities without placing them in a document.
    pub fn screen_all<'e>(
        &self,
        recognized: &'e [RecognizedEntity],
    ) -> Vec<(&'e RecognizedEntity, Label)> {
        recognized
            .iter()
            .filter_map(|entity| match screen(self.config, entity) {
                Screening::Accepted(label) => Some((entity, label)),
                _ => None,
            })
            .collect()
    }

    fn place_match(
        &self,
        document: &ContractDocument,
        bytes: Range<usize>,
        label: Label,
    ) -> Option<Span> {
        document
            .index()
            .char_range(bytes)
            .and_then(|chars| Span::new(chars.start, chars.end, label, document.char_len()).ok())
    }
}
