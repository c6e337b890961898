use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The externally adjustable rule tables.
///
/// Every field falls back to the standard table when omitted, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleTables {
    /// Recognizer surface texts that are never entities (compared lowercased,
    /// with periods and commas stripped).
    pub blacklist: Vec<String>,
    /// Recognizer surface texts containing any of these are dropped ("the auditor").
    pub blocked_substrings: Vec<String>,
    /// Checked in order; the first entry whose marker or word appears wins.
    pub currencies: Vec<CurrencyEntry>,
    pub default_currency: String,
    /// Checked in order; the first word found sets the multiplier.
    pub magnitudes: Vec<MagnitudeWord>,
    pub months: BTreeMap<String, u32>,
    pub boilerplate_phrases: Vec<String>,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencyEntry {
    pub code: String,
    /// Codes and symbols that may prefix an amount ("USD", "$").
    #[serde(default)]
    pub markers: Vec<String>,
    /// Spelled-out currency names ("dollars").
    #[serde(default)]
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MagnitudeWord {
    pub word: String,
    pub multiplier: f64,
}

/// Length and ratio thresholds. Lengths count chars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub min_length: usize,
    pub date_min_length: usize,
    pub party_min_length: usize,
    pub jurisdiction_min_alpha_ratio: f64,
    pub recognizer_min_length: usize,
    pub recognizer_max_symbol_ratio: f64,
    pub min_mean_word_length: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_length: 2,
            date_min_length: 6,
            party_min_length: 3,
            jurisdiction_min_alpha_ratio: 0.5,
            recognizer_min_length: 3,
            recognizer_max_symbol_ratio: 0.5,
            min_mean_word_length: 3.0,
        }
    }
}

impl CurrencyEntry {
    fn new(code: &str, markers: &[&str], words: &[&str]) -> Self {
        CurrencyEntry {
            code: code.to_string(),
            markers: markers.iter().map(|s| s.to_string()).collect(),
            words: words.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for RuleTables {
    fn default() -> Self {
        RuleTables {
            blacklist: strings(&[
                "company",
                "party",
                "annexes",
                "agreement",
                "contract",
                "hereinafter",
                "schedule",
                "page",
                "section",
                "clause",
                "eur",
                "usd",
                "inr",
                "jpy",
                "rupees",
                "rs",
                "rss",
                "rupoos",
                "date",
                "place",
                "signed",
                "signature",
                "business",
                "exclusivity",
                "ui",
                "iso",
                "global negotiator",
                "auditor",
                "auditee",
                "government",
                "guidelines",
                "confidential information",
                "terms",
                "digital locker",
                "service provider",
                "information security",
                "client",
                "board of directors",
                "act",
                "rule",
                "regulations",
                "courts",
                "forums",
                "ministry",
                "department",
                "state",
                "central",
            ]),
            blocked_substrings: strings(&["auditor", "auditee"]),
            currencies: vec![
                CurrencyEntry::new("USD", &["USD", "$"], &["dollars", "dollar"]),
                CurrencyEntry::new("EUR", &["EUR", "€"], &["euros", "euro"]),
                CurrencyEntry::new("GBP", &["GBP", "£"], &["pounds sterling", "pounds"]),
                CurrencyEntry::new("JPY", &["JPY", "¥"], &["yen"]),
                CurrencyEntry::new("INR", &["INR", "Rs.", "Rs", "₹"], &["rupees", "rupee"]),
            ],
            default_currency: "INR".to_string(),
            magnitudes: vec![
                MagnitudeWord { word: "crore".into(), multiplier: 1e7 },
                MagnitudeWord { word: "lakh".into(), multiplier: 1e5 },
                MagnitudeWord { word: "thousand".into(), multiplier: 1e3 },
                MagnitudeWord { word: "million".into(), multiplier: 1e6 },
                MagnitudeWord { word: "billion".into(), multiplier: 1e9 },
            ],
            months: standard_months(),
            boilerplate_phrases: strings(&[
                "hereinafter",
                "referred to as",
                "the party",
                "party of",
                "witnesseth",
                "whereas",
                "represented by",
            ]),
            thresholds: Thresholds::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn standard_months() -> BTreeMap<String, u32> {
    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];

    let mut months = BTreeMap::new();
    for (i, name) in NAMES.iter().enumerate() {
        let number = i as u32 + 1;
        months.insert(name.to_string(), number);
        months.insert(name[..3].to_string(), number);
    }
    months
}
