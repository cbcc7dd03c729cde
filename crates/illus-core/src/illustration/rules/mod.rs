//! Field rules: ordered (pattern, cleaner) pairs per field.

pub mod amounts;
pub mod patterns;

pub use amounts::clean_currency;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::models::record::Field;

use patterns::*;

/// Transform applied to a successful capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cleaner {
    /// Keep the capture as is (trimmed).
    #[default]
    Identity,
    /// Strip `$` and `,` and trim.
    Currency,
}

impl Cleaner {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Cleaner::Identity => raw.trim().to_string(),
            Cleaner::Currency => clean_currency(raw),
        }
    }
}

/// A single extraction rule for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: Field,
    pattern: Regex,
    cleaner: Cleaner,
}

/// A rule's successful capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Captured text as found in the document.
    pub raw: String,
    /// Captured text after cleaning.
    pub value: String,
}

impl FieldRule {
    /// Build a rule, checking the pattern has exactly one capture group.
    pub fn new(field: Field, pattern: Regex, cleaner: Cleaner) -> Result<Self, ExtractionError> {
        if field == Field::FileName {
            return Err(ExtractionError::UnknownField(format!(
                "{} is set from the file, not extracted",
                field
            )));
        }

        let groups = pattern.captures_len() - 1;
        if groups != 1 {
            return Err(ExtractionError::InvalidPattern {
                field: field.to_string(),
                reason: format!("expected exactly one capture group, found {}", groups),
            });
        }

        Ok(Self {
            field,
            pattern,
            cleaner,
        })
    }

    /// Compile a rule from a pattern string.
    pub fn parse(field: Field, pattern: &str, cleaner: Cleaner) -> Result<Self, ExtractionError> {
        let regex = Regex::new(pattern).map_err(|e| ExtractionError::InvalidPattern {
            field: field.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(field, regex, cleaner)
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Apply the rule to the first match of its pattern.
    ///
    /// A whitespace-only capture is not a match; later matches of the same
    /// pattern are not consulted.
    pub fn apply(&self, text: &str) -> Option<RuleMatch> {
        let caps = self.pattern.captures(text)?;
        let group = caps.get(1)?;
        if group.as_str().trim().is_empty() {
            return None;
        }

        Some(RuleMatch {
            raw: group.as_str().to_string(),
            value: self.cleaner.apply(group.as_str()),
        })
    }
}

/// Built-in rules in priority order.
pub fn builtin_rules() -> Vec<FieldRule> {
    let table: [(Field, &Regex, Cleaner); 20] = [
        (Field::ProductCode, &*PRODUCT_CODE_QUOTED, Cleaner::Identity),
        (Field::Currency, &*CURRENCY_QUOTED, Cleaner::Identity),
        (Field::FaceAmount, &*FACE_AMOUNT_QUOTED, Cleaner::Currency),
        (Field::FaceAmount, &*FACE_AMOUNT_LABEL, Cleaner::Currency),
        (Field::FaceAmount, &*SUM_ASSURED_LABEL, Cleaner::Currency),
        (Field::FaceAmount, &*SPECIFIED_AMOUNT_LABEL, Cleaner::Currency),
        (Field::AnnualPremium, &*ANNUAL_PREMIUM_QUOTED, Cleaner::Currency),
        (Field::AnnualPremium, &*ANNUAL_PREMIUM_LABEL, Cleaner::Currency),
        (Field::AnnualPremium, &*PLANNED_PREMIUM_LABEL, Cleaner::Currency),
        (Field::AnnualPremium, &*YEARLY_PREMIUM_LABEL, Cleaner::Currency),
        (Field::Total10PayPremium, &*TOTAL_10_PAY_PREMIUM_LABEL, Cleaner::Currency),
        (Field::CashValueYear10, &*CASH_VALUE_Y10_QUOTED, Cleaner::Currency),
        (Field::CashValueYear10, &*CASH_VALUE_Y10_LEDGER, Cleaner::Currency),
        (Field::CashValueYear20, &*CASH_VALUE_Y20_QUOTED, Cleaner::Currency),
        (Field::CashValueYear20, &*CASH_VALUE_Y20_LEDGER, Cleaner::Currency),
        (Field::CashValueYear30, &*CASH_VALUE_Y30_QUOTED, Cleaner::Currency),
        (Field::CashValueYear30, &*CASH_VALUE_Y30_LEDGER, Cleaner::Currency),
        (Field::GuaranteedInterestRate, &*GUARANTEED_RATE_QUOTED, Cleaner::Identity),
        (Field::SurrenderPenaltyPeriod, &*SURRENDER_PERIOD_QUOTED, Cleaner::Identity),
        (Field::SpRating, &*SP_RATING_QUOTED, Cleaner::Identity),
    ];

    table
        .into_iter()
        .map(|(field, pattern, cleaner)| FieldRule {
            field,
            pattern: pattern.clone(),
            cleaner,
        })
        .collect()
}
