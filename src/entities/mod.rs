//! Entity post-processing: validate, normalize, deduplicate.
//!
//! Items flow through in input order. A rejected item is dropped; an item whose
//! normalization fails is kept with its trimmed surface text.

pub mod dedup;
pub mod normalization;
pub mod validation;

use crate::config::Configuration;
use crate::types::{Entity, EntityCounters, Label};

pub use dedup::Deduplicator;
pub use normalization::{
    clean_party_name, detect_currency, normalize_amount, normalize_date, parse_amount, parse_date,
    EntityNormalizer, MoneyAmount, NormalizeError,
};
pub use validation::{EntityValidator, Rejection};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedEntities {
    pub entities: Vec<Entity>,
    pub counters: EntityCounters,
}

pub struct EntityProcessor<'c> {
    validator: EntityValidator<'c>,
    normalizer: EntityNormalizer<'c>,
}

impl<'c> EntityProcessor<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self {
            validator: EntityValidator::new(config),
            normalizer: EntityNormalizer::new(config),
        }
    }

    pub fn process<'a, I>(&self, items: I) -> ProcessedEntities
    where
        I: IntoIterator<Item = (&'a str, Label)>,
    {
        let mut counters = EntityCounters::default();
        let mut entities = Vec::new();

        for (raw, label) in items {
            counters.received += 1;
            let surface = raw.trim();

            if self.validator.validate(surface, label).is_err() {
                counters.rejected += 1;
                continue;
            }

            let canonical = match self.normalizer.normalize(surface, label) {
                Ok(canonical) => canonical,
                Err(_) => {
                    counters.normalization_fallbacks += 1;
                    surface.to_string()
                }
            };
            // Party names made only of boilerplate clean down to nothing.
            if canonical.trim().is_empty() {
                counters.rejected += 1;
                continue;
            }

            let entity = Entity::from_normalized(surface, canonical, label);
            if entity.original_text.is_some() {
                counters.normalized += 1;
            }
            entities.push(entity);
        }

        let (entities, dropped) = Deduplicator.deduplicate(entities);
        counters.duplicates_dropped = dropped;
        counters.emitted = entities.len();

        ProcessedEntities { entities, counters }
    }
}

/// Validate, normalize and deduplicate `(text, label)` pairs.
pub fn process_entities<'a, I>(config: &Configuration, items: I) -> ProcessedEntities
where
    I: IntoIterator<Item = (&'a str, Label)>,
{
    EntityProcessor::new(config).process(items)
}
