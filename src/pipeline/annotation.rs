use tracing::debug;

use crate::candidates::SpanCandidateGenerator;
use crate::config::Configuration;
use crate::document::ContractDocument;
use crate::resolution::OverlapResolver;
use crate::types::{PipelineCounters, RecognizedEntity, TrainingRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// Mean word length below the configured minimum, typical of garbled OCR.
    Illegible { mean_word_length: f64 },
    NoSpans,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationOutcome {
    Labelled(TrainingRecord),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub outcome: AnnotationOutcome,
    pub counters: PipelineCounters,
}

/// Turns raw documents into positional training examples.
///
/// Spans are kept exactly as detected: no normalization and no deduplication.
pub struct Annotator<'c> {
    config: &'c Configuration,
    generator: SpanCandidateGenerator<'c>,
}

impl<'c> Annotator<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self {
            config,
            generator: SpanCandidateGenerator::new(config),
        }
    }

    pub fn annotate(
        &self,
        document: &ContractDocument,
        recognized: &[RecognizedEntity],
    ) -> Annotation {
        let mut counters = PipelineCounters::default();

        let mean_word_length = document.mean_word_length();
        if mean_word_length < self.config.thresholds().min_mean_word_length {
            debug!(
                document = document.id().as_str(),
                mean_word_length,
                "skipping illegible document"
            );
            return Annotation {
                outcome: AnnotationOutcome::Skipped(SkipReason::Illegible { mean_word_length }),
                counters,
            };
        }

        let generated = self.generator.generate(document, recognized);
        counters.generation = generated.counters;

        let resolution = OverlapResolver.resolve(generated.candidates);
        counters.resolution = resolution.counters;

        debug!(
            document = document.id().as_str(),
            candidates = counters.generation.candidates(),
            malformed = counters.generation.malformed,
            filtered = counters.generation.recognized_filtered,
            accepted = counters.resolution.accepted,
            discarded = counters.resolution.discarded_by_overlap,
            "annotated document"
        );

        let outcome = if resolution.spans.is_empty() {
            AnnotationOutcome::Skipped(SkipReason::NoSpans)
        } else {
            AnnotationOutcome::Labelled(TrainingRecord::new(
                document.text().to_string(),
                resolution.spans,
            ))
        };

        Annotation { outcome, counters }
    }
}
