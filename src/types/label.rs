use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of contract fields the engine extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    PartyName,
    EffectiveDate,
    ExpirationDate,
    Jurisdiction,
    TotalAmount,
    InterestRate,
    Collateral,
    ConfidentialityPeriod,
    TerminationNoticePeriod,
    GoverningLaw,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown label: {0}")]
pub struct UnknownLabel(pub String);

/// How an entity's surface text is canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationStrategy {
    IsoDate,
    Currency,
    PartyName,
    Verbatim,
}

/// Which admissibility rule an entity must pass on top of the minimum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    Date,
    Amount,
    Party,
    Jurisdiction,
    LengthOnly,
}

impl Label {
    pub const ALL: [Label; 10] = [
        Label::PartyName,
        Label::EffectiveDate,
        Label::ExpirationDate,
        Label::Jurisdiction,
        Label::TotalAmount,
        Label::InterestRate,
        Label::Collateral,
        Label::ConfidentialityPeriod,
        Label::TerminationNoticePeriod,
        Label::GoverningLaw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::PartyName => "PARTY_NAME",
            Label::EffectiveDate => "EFFECTIVE_DATE",
            Label::ExpirationDate => "EXPIRATION_DATE",
            Label::Jurisdiction => "JURISDICTION",
            Label::TotalAmount => "TOTAL_AMOUNT",
            Label::InterestRate => "INTEREST_RATE",
            Label::Collateral => "COLLATERAL",
            Label::ConfidentialityPeriod => "CONFIDENTIALITY_PERIOD",
            Label::TerminationNoticePeriod => "TERMINATION_NOTICE_PERIOD",
            Label::GoverningLaw => "GOVERNING_LAW",
        }
    }

    pub fn normalization(&self) -> NormalizationStrategy {
        match self {
            Label::EffectiveDate | Label::ExpirationDate => NormalizationStrategy::IsoDate,
            Label::TotalAmount => NormalizationStrategy::Currency,
            Label::PartyName => NormalizationStrategy::PartyName,
            Label::Jurisdiction
            | Label::InterestRate
            | Label::Collateral
            | Label::ConfidentialityPeriod
            | Label::TerminationNoticePeriod
            | Label::GoverningLaw => NormalizationStrategy::Verbatim,
        }
    }

    pub fn validation(&self) -> ValidationRule {
        match self {
            Label::EffectiveDate | Label::ExpirationDate => ValidationRule::Date,
            Label::TotalAmount => ValidationRule::Amount,
            Label::PartyName => ValidationRule::Party,
            Label::Jurisdiction => ValidationRule::Jurisdiction,
            Label::InterestRate
            | Label::Collateral
            | Label::ConfidentialityPeriod
            | Label::TerminationNoticePeriod
            | Label::GoverningLaw => ValidationRule::LengthOnly,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}

/// Coarse categories emitted by a general-purpose recognizer.
///
/// `Custom` covers recognizers trained on the contract labels themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerCategory {
    Organization,
    Person,
    GeoPolitical,
    Custom(Label),
}

impl RecognizerCategory {
    /// Returns `None` for categories the engine has no use for (DATE, MONEY, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ORG" => Some(RecognizerCategory::Organization),
            "PERSON" => Some(RecognizerCategory::Person),
            "GPE" => Some(RecognizerCategory::GeoPolitical),
            other => other.parse().ok().map(RecognizerCategory::Custom),
        }
    }

    pub fn label(&self) -> Label {
        match self {
            RecognizerCategory::Organization | RecognizerCategory::Person => Label::PartyName,
            RecognizerCategory::GeoPolitical => Label::Jurisdiction,
            RecognizerCategory::Custom(label) => *label,
        }
    }
}
