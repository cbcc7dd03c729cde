//! Comparison record model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Value stored when no rule matched a field.
pub const NOT_AVAILABLE: &str = "N/A";

/// A column of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FileName,
    ProductCode,
    Currency,
    FaceAmount,
    AnnualPremium,
    #[serde(rename = "total10PayPremium")]
    Total10PayPremium,
    #[serde(rename = "cashValueYear10")]
    CashValueYear10,
    #[serde(rename = "cashValueYear20")]
    CashValueYear20,
    #[serde(rename = "cashValueYear30")]
    CashValueYear30,
    GuaranteedInterestRate,
    SurrenderPenaltyPeriod,
    SpRating,
}

impl Field {
    /// All fields in table/report column order.
    pub const ALL: [Field; 12] = [
        Field::FileName,
        Field::ProductCode,
        Field::Currency,
        Field::FaceAmount,
        Field::AnnualPremium,
        Field::Total10PayPremium,
        Field::CashValueYear10,
        Field::CashValueYear20,
        Field::CashValueYear30,
        Field::GuaranteedInterestRate,
        Field::SurrenderPenaltyPeriod,
        Field::SpRating,
    ];

    /// Fields filled in by the extractor (everything but the file name).
    pub const EXTRACTED: [Field; 11] = [
        Field::ProductCode,
        Field::Currency,
        Field::FaceAmount,
        Field::AnnualPremium,
        Field::Total10PayPremium,
        Field::CashValueYear10,
        Field::CashValueYear20,
        Field::CashValueYear30,
        Field::GuaranteedInterestRate,
        Field::SurrenderPenaltyPeriod,
        Field::SpRating,
    ];

    /// Record key, as used in JSON output and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Field::FileName => "fileName",
            Field::ProductCode => "productCode",
            Field::Currency => "currency",
            Field::FaceAmount => "faceAmount",
            Field::AnnualPremium => "annualPremium",
            Field::Total10PayPremium => "total10PayPremium",
            Field::CashValueYear10 => "cashValueYear10",
            Field::CashValueYear20 => "cashValueYear20",
            Field::CashValueYear30 => "cashValueYear30",
            Field::GuaranteedInterestRate => "guaranteedInterestRate",
            Field::SurrenderPenaltyPeriod => "surrenderPenaltyPeriod",
            Field::SpRating => "spRating",
        }
    }

    /// Column header used in the table and the PDF report.
    pub fn header(&self) -> &'static str {
        match self {
            Field::FileName => "File Name",
            Field::ProductCode => "Product Code",
            Field::Currency => "Currency",
            Field::FaceAmount => "Face Amount",
            Field::AnnualPremium => "Annual Premium",
            Field::Total10PayPremium => "Total 10 Pay Premium",
            Field::CashValueYear10 => "Cash Value Y10",
            Field::CashValueYear20 => "Cash Value Y20",
            Field::CashValueYear30 => "Cash Value Y30",
            Field::GuaranteedInterestRate => "Guaranteed Rate",
            Field::SurrenderPenaltyPeriod => "Surrender Period",
            Field::SpRating => "S&P Rating",
        }
    }

    /// Whether the table sorts this column numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Field::FaceAmount
                | Field::AnnualPremium
                | Field::Total10PayPremium
                | Field::CashValueYear10
                | Field::CashValueYear20
                | Field::CashValueYear30
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ExtractionError;

    /// Accepts the record key in any case, with or without `_`/`-` separators
    /// (`cashValueYear10`, `cash_value_year_10`, `CASH-VALUE-YEAR-10`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        Field::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == wanted)
            .ok_or_else(|| ExtractionError::UnknownField(s.to_string()))
    }
}

/// Values extracted from one document's text.
///
/// Every field is always populated; fields no rule matched hold [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub product_code: String,
    pub currency: String,
    pub face_amount: String,
    pub annual_premium: String,
    #[serde(rename = "total10PayPremium")]
    pub total_10_pay_premium: String,
    #[serde(rename = "cashValueYear10")]
    pub cash_value_year_10: String,
    #[serde(rename = "cashValueYear20")]
    pub cash_value_year_20: String,
    #[serde(rename = "cashValueYear30")]
    pub cash_value_year_30: String,
    pub guaranteed_interest_rate: String,
    pub surrender_penalty_period: String,
    pub sp_rating: String,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            product_code: na(),
            currency: na(),
            face_amount: na(),
            annual_premium: na(),
            total_10_pay_premium: na(),
            cash_value_year_10: na(),
            cash_value_year_20: na(),
            cash_value_year_30: na(),
            guaranteed_interest_rate: na(),
            surrender_penalty_period: na(),
            sp_rating: na(),
        }
    }
}

impl ExtractedFields {
    /// Value of an extracted field. `None` only for [`Field::FileName`].
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FileName => return None,
            Field::ProductCode => &self.product_code,
            Field::Currency => &self.currency,
            Field::FaceAmount => &self.face_amount,
            Field::AnnualPremium => &self.annual_premium,
            Field::Total10PayPremium => &self.total_10_pay_premium,
            Field::CashValueYear10 => &self.cash_value_year_10,
            Field::CashValueYear20 => &self.cash_value_year_20,
            Field::CashValueYear30 => &self.cash_value_year_30,
            Field::GuaranteedInterestRate => &self.guaranteed_interest_rate,
            Field::SurrenderPenaltyPeriod => &self.surrender_penalty_period,
            Field::SpRating => &self.sp_rating,
        };
        Some(value)
    }

    pub(crate) fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        let slot = match field {
            Field::FileName => return None,
            Field::ProductCode => &mut self.product_code,
            Field::Currency => &mut self.currency,
            Field::FaceAmount => &mut self.face_amount,
            Field::AnnualPremium => &mut self.annual_premium,
            Field::Total10PayPremium => &mut self.total_10_pay_premium,
            Field::CashValueYear10 => &mut self.cash_value_year_10,
            Field::CashValueYear20 => &mut self.cash_value_year_20,
            Field::CashValueYear30 => &mut self.cash_value_year_30,
            Field::GuaranteedInterestRate => &mut self.guaranteed_interest_rate,
            Field::SurrenderPenaltyPeriod => &mut self.surrender_penalty_period,
            Field::SpRating => &mut self.sp_rating,
        };
        Some(slot)
    }

    /// Fields that fell back to [`NOT_AVAILABLE`].
    pub fn missing(&self) -> Vec<Field> {
        Field::EXTRACTED
            .into_iter()
            .filter(|f| self.get(*f) == Some(NOT_AVAILABLE))
            .collect()
    }
}

/// One row of the comparison table: a document's display name plus its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    file_name: String,
    #[serde(flatten)]
    fields: ExtractedFields,
}

impl ExtractedRecord {
    /// Attach the source file's display name to extracted fields.
    pub fn new(file_name: impl Into<String>, fields: ExtractedFields) -> Self {
        Self {
            file_name: file_name.into(),
            fields,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn fields(&self) -> &ExtractedFields {
        &self.fields
    }

    /// Value of any column.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FileName => &self.file_name,
            other => self.fields.get(other).unwrap_or(NOT_AVAILABLE),
        }
    }

    /// All column values in [`Field::ALL`] order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        Field::ALL.into_iter().map(move |f| self.get(f))
    }
}
