pub mod entity;
pub mod identifiers;
pub mod label;
pub mod report;
pub mod span;

pub use entity::{Entity, RecognizedEntity};
pub use identifiers::{DocumentId, DocumentVersion};
pub use label::{Label, NormalizationStrategy, RecognizerCategory, UnknownLabel, ValidationRule};
pub use report::{
    AlignmentCounters, EntityCounters, ExtractionMetadata, ExtractionReport, GenerationCounters,
    PipelineCounters, ResolutionCounters, TrainingRecord,
};
pub use span::{Candidate, ResolvedSpanSet, Span, SpanError};
