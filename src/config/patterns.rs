use once_cell::sync::Lazy;
use regex::Regex;

use super::tables::RuleTables;

// Table-independent patterns. These are constants: an invalid one is a
// programmer error and panics on first use.

/// `DD/MM/YYYY` or `DD-MM-YYYY`.
pub(crate) static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").expect("NUMERIC_DATE regex is invalid")
});

/// `YYYY-MM-DD`.
pub(crate) static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("ISO_DATE regex is invalid")
});

/// Digits with optional comma grouping and decimal part. Grouping is free-form
/// so both `5,000,000` and `50,00,000` match.
pub(crate) const NUMBER: &str = r"\d+(?:,\d+)*(?:\.\d+)?";

pub(crate) static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(NUMBER).expect("NUMBER regex is invalid"));

/// A period closing an alphabetic abbreviation ("Pvt.", "Ltd.").
pub(crate) static ABBREVIATION_PERIOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\p{Alphabetic})\.(\s|[,;:]|$)").expect("ABBREVIATION_PERIOD regex is invalid")
});

/// Patterns compiled from the rule tables. Built once per `Configuration`.
#[derive(Debug, Clone)]
pub struct RulePatterns {
    pub(crate) written_date: Option<Regex>,
    pub(crate) prefixed_amount: Option<Regex>,
    pub(crate) magnitude_amount: Option<Regex>,
    pub(crate) worded_amount: Option<Regex>,
    pub(crate) boilerplate: Vec<Regex>,
    /// One per currency table entry, in table order: its markers and words,
    /// with word boundaries in front of alphanumeric ones.
    pub(crate) currency_markers: Vec<Option<Regex>>,
}

impl RulePatterns {
    pub(crate) fn compile(tables: &RuleTables) -> Result<Self, regex::Error> {
        let months = alternation(tables.months.keys().map(String::as_str), false);
        let markers = alternation(
            tables
                .currencies
                .iter()
                .flat_map(|c| c.markers.iter().map(String::as_str)),
            true,
        );
        let words = alternation(
            tables
                .currencies
                .iter()
                .flat_map(|c| c.words.iter().map(String::as_str)),
            false,
        );
        let magnitudes = alternation(tables.magnitudes.iter().map(|m| m.word.as_str()), false);

        let magnitude_suffix = magnitudes
            .as_deref()
            .map(|m| format!(r"(?:\s*(?:{m})s?\b)?"))
            .unwrap_or_default();

        let written_date = months
            .as_deref()
            .map(|m| Regex::new(&format!(r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({m})\s+(\d{{4}})\b")))
            .transpose()?;

        let prefixed_amount = markers
            .as_deref()
            .map(|m| Regex::new(&format!(r"(?i)(?:{m})\s*{NUMBER}{magnitude_suffix}")))
            .transpose()?;

        let magnitude_amount = match (magnitudes.as_deref(), words.as_deref()) {
            (Some(m), Some(w)) => Some(Regex::new(&format!(
                r"(?i)\b{NUMBER}\s*(?:{m})s?\s+(?:{w})\b"
            ))?),
            _ => None,
        };

        let worded_amount = words
            .as_deref()
            .map(|w| Regex::new(&format!(r"(?i)\b(?:{w})\s+{NUMBER}{magnitude_suffix}")))
            .transpose()?;

        let boilerplate = tables
            .boilerplate_phrases
            .iter()
            .map(|phrase| Regex::new(&format!("(?i){}", phrase_pattern(phrase))))
            .collect::<Result<Vec<_>, _>>()?;

        let currency_markers = tables
            .currencies
            .iter()
            .map(|entry| {
                let items = entry.markers.iter().chain(&entry.words).map(String::as_str);
                alternation(items, true)
                    .map(|alt| Regex::new(&format!("(?i)(?:{alt})")))
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RulePatterns {
            currency_markers,
            written_date,
            prefixed_amount,
            magnitude_amount,
            worded_amount,
            boilerplate,
        })
    }
}

/// Escaped alternation, longest item first so "march" wins over "mar".
/// `None` when there is nothing to match, since an empty alternation would
/// match everywhere.
fn alternation<'a>(items: impl Iterator<Item = &'a str>, bound_words: bool) -> Option<String> {
    let mut items: Vec<&str> = items.map(str::trim).filter(|s| !s.is_empty()).collect();
    if items.is_empty() {
        return None;
    }
    items.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    items.dedup();

    let parts: Vec<String> = items
        .into_iter()
        .map(|item| {
            let escaped = phrase_pattern(item);
            let starts_alnum = item.chars().next().map_or(false, char::is_alphanumeric);
            if bound_words && starts_alnum {
                format!(r"\b{escaped}")
            } else {
                escaped
            }
        })
        .collect();

    Some(parts.join("|"))
}

/// Escape a phrase, letting any whitespace run stand in for its spaces.
fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}
