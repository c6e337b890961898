//! Greedy interval-conflict resolution.
//!
//! Candidates are ordered by `(start asc, length desc)` and accepted unless they
//! overlap an already accepted span. This favors the longer span at a shared
//! start and never revisits a decision, so it does not maximize coverage.

use std::cmp::Reverse;

use crate::types::{Candidate, ResolutionCounters, ResolvedSpanSet, Span};

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub spans: ResolvedSpanSet,
    pub counters: ResolutionCounters,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapResolver;

impl OverlapResolver {
    pub fn resolve(&self, candidates: Vec<Candidate>) -> Resolution {
        resolve_overlaps(candidates)
    }
}

pub fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Resolution {
    let considered = candidates.len();

    // 1. Ordering Phase
    // Stable: among identical (start, len) keys the earlier candidate wins.
    candidates.sort_by_key(|c| (c.start(), Reverse(c.len())));

    debug_assert!(candidates.windows(2).all(|w| {
        let (a, b) = (&w[0], &w[1]);
        a.start() < b.start() || (a.start() == b.start() && a.len() >= b.len())
    }));

    // 2. Greedy Phase
    // Accepted spans are disjoint and sorted, so the last one has the greatest
    // end and is the only one a later-starting candidate can overlap.
    let mut accepted: Vec<Span> = Vec::with_capacity(candidates.len());
    let mut discarded = 0;

    for candidate in candidates {
        match accepted.last() {
            Some(last) if last.overlaps(&candidate) => discarded += 1,
            _ => accepted.push(candidate),
        }
    }

    let counters = ResolutionCounters {
        considered,
        accepted: accepted.len(),
        discarded_by_overlap: discarded,
    };

    Resolution {
        spans: ResolvedSpanSet::from_sorted(accepted),
        counters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label;

    fn span(start: usize, end: usize, label: Label) -> Span {
        Span::unbounded(start, end, label).unwrap()
    }

    #[test]
    fn longer_span_wins_at_shared_start() {
        let resolution = resolve_overlaps(vec![
            span(10, 14, Label::TotalAmount),
            span(10, 25, Label::TotalAmount),
        ]);
        assert_eq!(resolution.spans.spans(), &[span(10, 25, Label::TotalAmount)]);
        assert_eq!(resolution.counters.discarded_by_overlap, 1);
    }

    #[test]
    fn earlier_start_wins_over_longer_later_span() {
        let resolution = resolve_overlaps(vec![
            span(5, 40, Label::PartyName),
            span(0, 8, Label::EffectiveDate),
        ]);
        assert_eq!(resolution.spans.spans(), &[span(0, 8, Label::EffectiveDate)]);
    }

    #[test]
    fn greedy_is_not_coverage_optimal() {
        // [0,10) blocks both [2,5) and [6,9), although dropping it would
        // admit two spans.
        let resolution = resolve_overlaps(vec![
            span(6, 9, Label::Jurisdiction),
            span(0, 10, Label::PartyName),
            span(2, 5, Label::PartyName),
        ]);
        assert_eq!(resolution.spans.len(), 1);
        assert_eq!(resolution.counters.discarded_by_overlap, 2);
    }

    #[test]
    fn identical_spans_keep_first_candidate() {
        let resolution = resolve_overlaps(vec![
            span(3, 9, Label::EffectiveDate),
            span(3, 9, Label::ExpirationDate),
        ]);
        assert_eq!(resolution.spans.spans()[0].label(), Label::EffectiveDate);
    }

    #[test]
    fn touching_spans_are_both_kept() {
        let resolution = resolve_overlaps(vec![
            span(4, 8, Label::PartyName),
            span(0, 4, Label::PartyName),
        ]);
        assert_eq!(
            resolution.spans.spans(),
            &[span(0, 4, Label::PartyName), span(4, 8, Label::PartyName)]
        );
    }

    #[test]
    fn empty_input_resolves_to_empty_set() {
        let resolution = OverlapResolver.resolve(Vec::new());
        assert!(resolution.spans.is_empty());
        assert_eq!(resolution.counters, ResolutionCounters::default());
    }
}
