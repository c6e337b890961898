use std::collections::HashSet;

use crate::types::Entity;

/// Keeps the first entity per `(lowercased text, label)`, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deduplicator;

impl Deduplicator {
    /// Returns the survivors and the number dropped.
    pub fn deduplicate(&self, entities: Vec<Entity>) -> (Vec<Entity>, usize) {
        let before = entities.len();
        let mut seen = HashSet::with_capacity(before);

        let kept: Vec<Entity> = entities
            .into_iter()
            .filter(|entity| seen.insert(entity.dedup_key()))
            .collect();

        let dropped = before - kept.len();
        (kept, dropped)
    }
}
