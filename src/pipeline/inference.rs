use std::collections::BTreeMap;

use tracing::debug;

use crate::candidates::SpanCandidateGenerator;
use crate::config::Configuration;
use crate::document::ContractDocument;
use crate::entities::{EntityProcessor, ProcessedEntities};
use crate::resolution::OverlapResolver;
use crate::types::{
    ExtractionMetadata, ExtractionReport, Label, PipelineCounters, RecognizedEntity,
};

/// Produces canonical entities for one document.
///
/// Detector spans and anchored recognizer entities go through the same
/// resolver as annotation mode; the surviving slices are then validated,
/// normalized and deduplicated in text order.
pub struct ExtractionPipeline<'c> {
    generator: SpanCandidateGenerator<'c>,
    processor: EntityProcessor<'c>,
}

impl<'c> ExtractionPipeline<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self {
            generator: SpanCandidateGenerator::new(config),
            processor: EntityProcessor::new(config),
        }
    }

    pub fn extract(
        &self,
        document: &ContractDocument,
        recognized: &[RecognizedEntity],
    ) -> ExtractionReport {
        let mut counters = PipelineCounters::default();

        let generated = self.generator.generate(document, recognized);
        counters.generation = generated.counters;

        let resolution = OverlapResolver.resolve(generated.candidates);
        counters.resolution = resolution.counters;

        let slices = resolution.spans.iter().filter_map(|span| {
            document
                .slice(span.start(), span.end())
                .map(|text| (text, span.label()))
        });
        let processed = self.processor.process(slices);
        counters.entities = processed.counters;

        debug!(
            document = document.id().as_str(),
            candidates = counters.generation.candidates(),
            malformed = counters.generation.malformed,
            resolved = counters.resolution.accepted,
            rejected = counters.entities.rejected,
            fallbacks = counters.entities.normalization_fallbacks,
            duplicates = counters.entities.duplicates_dropped,
            emitted = counters.entities.emitted,
            "extracted entities"
        );

        let mut entities_by_type: BTreeMap<Label, usize> = BTreeMap::new();
        for entity in &processed.entities {
            *entities_by_type.entry(entity.label).or_default() += 1;
        }

        ExtractionReport {
            metadata: ExtractionMetadata {
                document_id: document.id().as_str().to_string(),
                document_version: document.version().as_str().to_string(),
                text_length: document.char_len(),
                entities_found: processed.entities.len(),
                entities_by_type,
                counters,
            },
            entities: processed.entities,
        }
    }

    /// Recognizer output without a document: screen, then validate, normalize
    /// and deduplicate in input order.
    pub fn extract_recognized(&self, recognized: &[RecognizedEntity]) -> ProcessedEntities {
        let screened = self.generator.screen_all(recognized);
        self.processor
            .process(screened.into_iter().map(|(entity, label)| (entity.text.as_str(), label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentId, Entity};

    #[test]
    fn report_counts_entities_per_label() {
        let config = Configuration::default();
        let document = ContractDocument::new(
            DocumentId::new("Loan.txt"),
            "Disbursed on 01/04/2024 and repaid by 2025-03-31 to Mumbai branch.".to_string(),
        );
        let report = ExtractionPipeline::new(&config)
            .extract(&document, &[RecognizedEntity::new("Mumbai", "GPE")]);

        assert_eq!(
            report.entities,
            vec![
                Entity {
                    text: "2024-04-01".into(),
                    label: Label::EffectiveDate,
                    original_text: Some("01/04/2024".into()),
                },
                Entity::new("2025-03-31", Label::EffectiveDate),
                Entity::new("Mumbai", Label::Jurisdiction),
            ]
        );
        assert_eq!(report.metadata.document_id, "loan.txt");
        assert!(report.metadata.document_version.starts_with("sha256:"));
        assert_eq!(report.metadata.entities_found, 3);
        assert_eq!(report.metadata.entities_by_type[&Label::EffectiveDate], 2);
        assert_eq!(report.metadata.entities_by_type[&Label::Jurisdiction], 1);
    }

    #[test]
    fn recognizer_only_path_screens_first() {
        let config = Configuration::default();
        let processed = ExtractionPipeline::new(&config).extract_recognized(&[
            RecognizedEntity::new("ABC Corp", "ORG"),
            RecognizedEntity::new("Company", "ORG"),
            RecognizedEntity::new("15th March 2024", "DATE"),
            RecognizedEntity::new("Rs. 10 lakh", "TOTAL_AMOUNT"),
        ]);

        assert_eq!(
            processed.entities,
            vec![
                Entity::new("ABC Corp", Label::PartyName),
                Entity {
                    text: "INR 1000000.00".into(),
                    label: Label::TotalAmount,
                    original_text: Some("Rs. 10 lakh".into()),
                },
            ]
        );
    }

    #[test]
    fn empty_document_yields_empty_report() {
        let config = Configuration::default();
        let document = ContractDocument::new(DocumentId::new("empty.txt"), String::new());
        let report = ExtractionPipeline::new(&config).extract(&document, &[]);

        assert!(report.entities.is_empty());
        assert_eq!(report.metadata.text_length, 0);
        assert!(report.metadata.entities_by_type.is_empty());
    }
}
