//! The two operating modes.
//!
//! Annotation turns raw documents into positional training records; inference
//! turns a document plus recognizer output into canonical entities. Both share
//! one `Configuration`, one candidate generator and one overlap resolver.

pub mod annotation;
pub mod corpus;
pub mod inference;

pub use annotation::{Annotation, AnnotationOutcome, Annotator, SkipReason};
pub use corpus::{
    annotate_corpus, read_training_records, write_corpus_file, write_training_records,
    CorpusError, CorpusSummary, LoadedCorpus,
};
pub use inference::ExtractionPipeline;
