//! Immutable rule configuration.
//!
//! `RuleTables` is the serializable surface; `Configuration` is the validated,
//! compiled form every pipeline stage borrows. It is `Send + Sync` and never
//! mutated after construction.

pub mod patterns;
pub mod tables;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use patterns::RulePatterns;
pub use tables::{CurrencyEntry, MagnitudeWord, RuleTables, Thresholds};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Invalid rule table: {0}")]
    Invalid(String),
    #[error("Pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone)]
pub struct Configuration {
    tables: RuleTables,
    blacklist: HashSet<String>,
    blocked_substrings: Vec<String>,
    months: HashMap<String, u32>,
    patterns: RulePatterns,
}

impl Configuration {
    pub fn new(tables: RuleTables) -> Result<Self, ConfigError> {
        validate(&tables)?;

        let patterns = RulePatterns::compile(&tables)?;
        let blacklist = tables
            .blacklist
            .iter()
            .map(|term| term.trim().to_lowercase())
            .collect();
        let blocked_substrings = tables
            .blocked_substrings
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        let months = tables
            .months
            .iter()
            .map(|(name, number)| (name.trim().to_lowercase(), *number))
            .collect();

        tracing::debug!(
            blacklist = tables.blacklist.len(),
            currencies = tables.currencies.len(),
            magnitudes = tables.magnitudes.len(),
            months = tables.months.len(),
            boilerplate = tables.boilerplate_phrases.len(),
            "compiled rule configuration"
        );

        Ok(Configuration {
            tables,
            blacklist,
            blocked_substrings,
            months,
            patterns,
        })
    }

    /// Load rule tables from a `.json` or `.toml` file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let tables: RuleTables = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&raw)?,
            Some("toml") => toml::from_str(&raw)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        Configuration::new(tables)
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.tables.thresholds
    }

    pub fn patterns(&self) -> &RulePatterns {
        &self.patterns
    }

    pub fn currencies(&self) -> &[CurrencyEntry] {
        &self.tables.currencies
    }

    pub fn default_currency(&self) -> &str {
        &self.tables.default_currency
    }

    pub fn magnitudes(&self) -> &[MagnitudeWord] {
        &self.tables.magnitudes
    }

    /// `cleaned` must already be lowercased.
    pub fn is_blacklisted(&self, cleaned: &str) -> bool {
        self.blacklist.contains(cleaned)
    }

    /// `cleaned` must already be lowercased.
    pub fn has_blocked_substring(&self, cleaned: &str) -> bool {
        self.blocked_substrings
            .iter()
            .any(|term| cleaned.contains(term.as_str()))
    }

    pub fn month_number(&self, name: &str) -> Option<u32> {
        self.months.get(&name.to_lowercase()).copied()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(RuleTables::default()).expect("standard rule tables are valid")
    }
}

fn validate(tables: &RuleTables) -> Result<(), ConfigError> {
    let invalid = |msg: String| Err(ConfigError::Invalid(msg));

    if tables.default_currency.trim().is_empty() {
        return invalid("default_currency is empty".into());
    }

    for currency in &tables.currencies {
        if currency.code.trim().is_empty() {
            return invalid("currency entry with empty code".into());
        }
        if currency.markers.is_empty() && currency.words.is_empty() {
            return invalid(format!("currency {} has no markers or words", currency.code));
        }
        if currency
            .markers
            .iter()
            .chain(&currency.words)
            .any(|s| s.trim().is_empty())
        {
            return invalid(format!("currency {} has an empty marker or word", currency.code));
        }
    }

    for magnitude in &tables.magnitudes {
        if magnitude.word.trim().is_empty() {
            return invalid("magnitude entry with empty word".into());
        }
        if !magnitude.multiplier.is_finite() || magnitude.multiplier <= 0.0 {
            return invalid(format!(
                "magnitude {} has non-positive multiplier {}",
                magnitude.word, magnitude.multiplier
            ));
        }
    }

    if tables.months.is_empty() {
        return invalid("month table is empty".into());
    }
    for (name, number) in &tables.months {
        if name.trim().is_empty() {
            return invalid("month table has an empty name".into());
        }
        if !(1..=12).contains(number) {
            return invalid(format!("month {name} maps to {number}, expected 1-12"));
        }
    }

    if tables.boilerplate_phrases.iter().any(|p| p.trim().is_empty()) {
        return invalid("boilerplate phrase is empty".into());
    }

    let t = &tables.thresholds;
    for (name, ratio) in [
        ("jurisdiction_min_alpha_ratio", t.jurisdiction_min_alpha_ratio),
        ("recognizer_max_symbol_ratio", t.recognizer_max_symbol_ratio),
    ] {
        if !(0.0..=1.0).contains(&ratio) {
            return invalid(format!("{name} must be within [0, 1], got {ratio}"));
        }
    }
    if !t.min_mean_word_length.is_finite() || t.min_mean_word_length < 0.0 {
        return invalid(format!(
            "min_mean_word_length must be non-negative, got {}",
            t.min_mean_word_length
        ));
    }

    Ok(())
}
