use crate::config::Configuration;
use crate::document::ContractDocument;
use crate::types::{Label, RecognizedEntity, RecognizerCategory, Span, SpanError};

/// Why a recognizer entity was not turned into a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screening {
    Accepted(Label),
    UnknownCategory,
    Empty,
    Blacklisted,
    BlockedSubstring,
    TooShort,
    MostlySymbols,
}

/// Lowercase, drop periods and commas, trim.
pub fn clean_surface(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Filter and relabel one recognizer entity.
pub fn screen(config: &Configuration, entity: &RecognizedEntity) -> Screening {
    let label = match RecognizerCategory::parse(entity.label.trim()) {
        Some(category) => category.label(),
        None => return Screening::UnknownCategory,
    };

    let cleaned = clean_surface(&entity.text);
    if cleaned.is_empty() {
        return Screening::Empty;
    }
    if config.is_blacklisted(&cleaned) {
        return Screening::Blacklisted;
    }
    if config.has_blocked_substring(&cleaned) {
        return Screening::BlockedSubstring;
    }

    let thresholds = config.thresholds();
    let len = cleaned.chars().count();
    if len < thresholds.recognizer_min_length && label != Label::TotalAmount {
        return Screening::TooShort;
    }

    let symbols = cleaned.chars().filter(|c| !c.is_alphanumeric()).count();
    if symbols as f64 / len as f64 > thresholds.recognizer_max_symbol_ratio {
        return Screening::MostlySymbols;
    }

    Screening::Accepted(label)
}

/// Where an accepted entity sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Placed(Span),
    Malformed(SpanError),
    NotFound,
}

/// Use the recognizer's own offsets when it gave both. Otherwise take the
/// first occurrence of the trimmed surface text that no `occupied` span
/// overlaps (an identical interval does not count), falling back to the
/// first occurrence.
pub fn anchor<'s>(
    document: &ContractDocument,
    entity: &RecognizedEntity,
    label: Label,
    occupied: impl IntoIterator<Item = &'s Span>,
) -> Anchor {
    let len = document.char_len();

    if let (Some(start), Some(end)) = (entity.start, entity.end) {
        return match Span::new(start, end, label, len) {
            Ok(span) => Anchor::Placed(span),
            Err(err) => Anchor::Malformed(err),
        };
    }

    let surface = entity.text.trim();
    if surface.is_empty() {
        return Anchor::NotFound;
    }

    let mut placements = document
        .text()
        .match_indices(surface)
        .filter_map(|(byte_start, _)| {
            document
                .index()
                .char_range(byte_start..byte_start + surface.len())
        })
        .map(|chars| Span::new(chars.start, chars.end, label, len));

    let first = match placements.next() {
        Some(first) => first,
        None => return Anchor::NotFound,
    };

    let occupied: Vec<&Span> = occupied.into_iter().collect();
    let is_free = |candidate: &Span| {
        !occupied.iter().any(|span| {
            span.overlaps(candidate)
                && (span.start(), span.end()) != (candidate.start(), candidate.end())
        })
    };

    let chosen = std::iter::once(first)
        .chain(placements)
        .find(|placement| matches!(placement, Ok(span) if is_free(span)))
        .unwrap_or(first);

    match chosen {
        Ok(span) => Anchor::Placed(span),
        Err(err) => Anchor::Malformed(err),
    }
}
