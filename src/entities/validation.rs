use thiserror::Error;

use crate::config::Configuration;
use crate::types::{Label, ValidationRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("shorter than {min} chars")]
    TooShort { min: usize },
    #[error("contains no digit")]
    NoDigit,
    #[error("contains no letter")]
    NoLetter,
    #[error("mostly non-alphabetic")]
    MostlyNonAlphabetic,
}

pub struct EntityValidator<'c> {
    config: &'c Configuration,
}

impl<'c> EntityValidator<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self { config }
    }

    /// `text` is expected to be trimmed already.
    pub fn validate(&self, text: &str, label: Label) -> Result<(), Rejection> {
        let t = self.config.thresholds();
        let len = text.chars().count();

        if len < t.min_length {
            return Err(Rejection::TooShort { min: t.min_length });
        }

        match label.validation() {
            ValidationRule::Date => {
                if !has_digit(text) {
                    return Err(Rejection::NoDigit);
                }
                if len < t.date_min_length {
                    return Err(Rejection::TooShort {
                        min: t.date_min_length,
                    });
                }
            }
            ValidationRule::Amount => {
                if !has_digit(text) {
                    return Err(Rejection::NoDigit);
                }
            }
            ValidationRule::Party => {
                if !text.chars().any(char::is_alphabetic) {
                    return Err(Rejection::NoLetter);
                }
                if len < t.party_min_length {
                    return Err(Rejection::TooShort {
                        min: t.party_min_length,
                    });
                }
            }
            ValidationRule::Jurisdiction => {
                let alpha = text
                    .chars()
                    .filter(|c| c.is_alphabetic() || c.is_whitespace())
                    .count();
                if (alpha as f64 / len as f64) < t.jurisdiction_min_alpha_ratio {
                    return Err(Rejection::MostlyNonAlphabetic);
                }
            }
            ValidationRule::LengthOnly => {}
        }

        Ok(())
    }

    pub fn is_valid(&self, text: &str, label: Label) -> bool {
        self.validate(text, label).is_ok()
    }
}

fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}
