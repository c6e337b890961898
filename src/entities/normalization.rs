use chrono::NaiveDate;
use regex::Captures;
use thiserror::Error;

use crate::candidates::dates::date_patterns;
use crate::config::patterns::{ABBREVIATION_PERIOD, NUMBER_RE};
use crate::config::Configuration;
use crate::types::{Label, NormalizationStrategy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("no date expression in {0:?}")]
    NoDate(String),
    #[error("unknown month {0:?}")]
    UnknownMonth(String),
    #[error("{year}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("no numeric value in {0:?}")]
    NoNumber(String),
    #[error("cannot parse {0:?} as a number")]
    BadNumber(String),
}

/// A parsed monetary amount with its magnitude word already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyAmount {
    pub currency: String,
    pub value: f64,
}

impl MoneyAmount {
    /// `"<CCY> <value with two decimals>"`.
    pub fn canonical(&self) -> String {
        format!("{} {:.2}", self.currency, self.value)
    }
}

pub struct EntityNormalizer<'c> {
    config: &'c Configuration,
}

impl<'c> EntityNormalizer<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self { config }
    }

    /// Canonical form of `text` under `label`'s strategy. Verbatim labels and
    /// party names never fail; callers fall back to the input on error.
    pub fn normalize(&self, text: &str, label: Label) -> Result<String, NormalizeError> {
        match label.normalization() {
            NormalizationStrategy::IsoDate => normalize_date(self.config, text),
            NormalizationStrategy::Currency => normalize_amount(self.config, text),
            NormalizationStrategy::PartyName => Ok(clean_party_name(self.config, text)),
            NormalizationStrategy::Verbatim => Ok(text.to_string()),
        }
    }
}

/// The first date expression in `text`, tried written, numeric, then ISO.
pub fn parse_date(config: &Configuration, text: &str) -> Result<NaiveDate, NormalizeError> {
    let text = text.trim();
    let caps = date_patterns(config)
        .find_map(|re| re.captures(text))
        .ok_or_else(|| NormalizeError::NoDate(text.to_string()))?;

    let middle = &caps[2];
    if middle.chars().all(|c| c.is_ascii_digit()) {
        numeric_date(&caps)
    } else {
        let month = config
            .month_number(middle)
            .ok_or_else(|| NormalizeError::UnknownMonth(middle.to_string()))?;
        calendar_date(&caps[3], month, &caps[1])
    }
}

pub fn normalize_date(config: &Configuration, text: &str) -> Result<String, NormalizeError> {
    parse_date(config, text).map(|date| date.format("%Y-%m-%d").to_string())
}

/// A four-digit first segment is year-first, anything else is day-first.
fn numeric_date(caps: &Captures<'_>) -> Result<NaiveDate, NormalizeError> {
    let (first, second, third) = (&caps[1], &caps[2], &caps[3]);
    let month = parse_number::<u32>(second)?;
    if first.len() == 4 {
        calendar_date(first, month, third)
    } else {
        calendar_date(third, month, first)
    }
}

fn calendar_date(year: &str, month: u32, day: &str) -> Result<NaiveDate, NormalizeError> {
    let year = parse_number::<i32>(year)?;
    let day = parse_number::<u32>(day)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(NormalizeError::InvalidDate { year, month, day })
}

fn parse_number<T: std::str::FromStr>(digits: &str) -> Result<T, NormalizeError> {
    digits
        .parse()
        .map_err(|_| NormalizeError::BadNumber(digits.to_string()))
}

/// First currency table entry with a marker or word in `text`, else the default.
/// Alphanumeric markers must start a word, so "AMATEUR" does not name EUR.
pub fn detect_currency<'c>(config: &'c Configuration, text: &str) -> &'c str {
    config
        .currencies()
        .iter()
        .zip(&config.patterns().currency_markers)
        .find(|(_, markers)| markers.as_ref().map_or(false, |re| re.is_match(text)))
        .map(|(entry, _)| entry.code.as_str())
        .unwrap_or_else(|| config.default_currency())
}

/// Multiplier of the first magnitude word in `text`, else 1.
pub fn magnitude_multiplier(config: &Configuration, text: &str) -> f64 {
    let lower = text.to_lowercase();
    config
        .magnitudes()
        .iter()
        .find(|m| lower.contains(&m.word.to_lowercase()))
        .map_or(1.0, |m| m.multiplier)
}

pub fn parse_amount(config: &Configuration, text: &str) -> Result<MoneyAmount, NormalizeError> {
    let number = NUMBER_RE
        .find(text)
        .ok_or_else(|| NormalizeError::NoNumber(text.to_string()))?;
    let digits = number.as_str().replace(',', "");
    let base: f64 = parse_number(&digits)?;

    Ok(MoneyAmount {
        currency: detect_currency(config, text).to_string(),
        value: base * magnitude_multiplier(config, text),
    })
}

pub fn normalize_amount(config: &Configuration, text: &str) -> Result<String, NormalizeError> {
    parse_amount(config, text).map(|amount| amount.canonical())
}

/// Strip boilerplate phrases and abbreviation periods, collapse whitespace and
/// drop trailing punctuation.
pub fn clean_party_name(config: &Configuration, text: &str) -> String {
    let mut cleaned = text.trim().to_string();
    for phrase in &config.patterns().boilerplate {
        cleaned = phrase.replace_all(&cleaned, "").into_owned();
    }
    let cleaned = ABBREVIATION_PERIOD.replace_all(&cleaned, "${1}${2}");

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | ':') || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_day_first_and_year_first() {
        let config = Configuration::default();
        assert_eq!(normalize_date(&config, "15-3-2024").unwrap(), "2024-03-15");
        assert_eq!(normalize_date(&config, "1/2/2025").unwrap(), "2025-02-01");
        assert_eq!(normalize_date(&config, "on 2025-12-31").unwrap(), "2025-12-31");
    }

    #[test]
    fn written_dates_accept_abbreviations_and_suffixes() {
        let config = Configuration::default();
        assert_eq!(normalize_date(&config, "31st December 2025").unwrap(), "2025-12-31");
        assert_eq!(normalize_date(&config, "2nd FEB 2024").unwrap(), "2024-02-02");
        assert_eq!(normalize_date(&config, "7 Sep 2023").unwrap(), "2023-09-07");
    }

    #[test]
    fn impossible_and_missing_dates_are_errors() {
        let config = Configuration::default();
        assert_eq!(
            normalize_date(&config, "31/02/2024"),
            Err(NormalizeError::InvalidDate { year: 2024, month: 2, day: 31 })
        );
        assert!(matches!(
            normalize_date(&config, "Date:  15 / 01 / 2024"),
            Err(NormalizeError::NoDate(_))
        ));
    }

    #[test]
    fn currency_detection_follows_table_order() {
        let config = Configuration::default();
        assert_eq!(detect_currency(&config, "$1,000,000"), "USD");
        assert_eq!(detect_currency(&config, "EUR 20"), "EUR");
        assert_eq!(detect_currency(&config, "£ 20"), "GBP");
        assert_eq!(detect_currency(&config, "5 million dollars"), "USD");
        assert_eq!(detect_currency(&config, "Rs. 50,00,000"), "INR");
        assert_eq!(detect_currency(&config, "50,000"), "INR");
    }

    #[test]
    fn currency_codes_inside_words_are_ignored() {
        let config = Configuration::default();
        assert_eq!(detect_currency(&config, "AMATEUR 500"), "INR");
        assert_eq!(detect_currency(&config, "500 eur"), "EUR");
        assert_eq!(detect_currency(&config, "USD500"), "USD");
    }

    #[test]
    fn amounts_apply_magnitude_words() {
        let config = Configuration::default();
        assert_eq!(normalize_amount(&config, "INR 5 crore").unwrap(), "INR 50000000.00");
        assert_eq!(normalize_amount(&config, "$1,000,000").unwrap(), "USD 1000000.00");
        assert_eq!(normalize_amount(&config, "Rs.  1,50,000/-").unwrap(), "INR 150000.00");
        assert_eq!(normalize_amount(&config, "EUR 2.5 thousand").unwrap(), "EUR 2500.00");
        assert_eq!(normalize_amount(&config, "Rs. 10 lakhs").unwrap(), "INR 1000000.00");
    }

    #[test]
    fn amount_without_number_is_an_error() {
        let config = Configuration::default();
        assert!(matches!(
            normalize_amount(&config, "rupees only"),
            Err(NormalizeError::NoNumber(_))
        ));
    }

    #[test]
    fn party_names_lose_boilerplate() {
        let config = Configuration::default();
        assert_eq!(
            clean_party_name(&config, "ABC Corporation Pvt. Ltd."),
            "ABC Corporation Pvt Ltd"
        );
        assert_eq!(
            clean_party_name(&config, "XYZ Industries Ltd., hereinafter referred to as"),
            "XYZ Industries Ltd"
        );
        assert_eq!(
            clean_party_name(&config, "M/s  Sharma   Traders represented by"),
            "M/s Sharma Traders"
        );
        assert_eq!(clean_party_name(&config, "  ABC Corp  "), "ABC Corp");
    }

    #[test]
    fn verbatim_labels_pass_through() {
        let config = Configuration::default();
        let normalizer = EntityNormalizer::new(&config);
        assert_eq!(
            normalizer.normalize("12.5% per annum", Label::InterestRate).unwrap(),
            "12.5% per annum"
        );
    }
}
