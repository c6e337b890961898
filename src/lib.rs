//! Deterministic rule engine for legal-contract field extraction.
//!
//! `lexiscan-core` proposes candidate spans for dates and amounts with pattern
//! rules, screens and anchors entities from an external recognizer, resolves
//! overlapping candidates greedily, and validates, normalizes and deduplicates
//! the resulting entities. Annotation mode emits JSON Lines training records;
//! inference mode emits canonical entities with an extraction report.
//!
//! Every stage is a pure function of its input and an immutable
//! [`Configuration`], which is `Send + Sync` and may be shared across threads.

pub mod candidates;
pub mod config;
pub mod document;
pub mod entities;
pub mod pipeline;
pub mod resolution;
pub mod types;

pub use candidates::{GeneratedCandidates, SpanCandidateGenerator};
pub use config::{ConfigError, Configuration, RuleTables};
pub use document::{ContractDocument, DocumentError};
pub use entities::{process_entities, EntityProcessor, ProcessedEntities};
pub use pipeline::{Annotator, ExtractionPipeline};
pub use resolution::{resolve_overlaps, OverlapResolver, Resolution};
pub use types::{Entity, ExtractionReport, Label, RecognizedEntity, Span, TrainingRecord};
