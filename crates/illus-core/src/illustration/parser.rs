//! Ordered-fallback field extractor.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::rules::{builtin_rules, FieldRule};
use crate::error::ExtractionError;
use crate::models::config::{CustomRule, ExtractionConfig};
use crate::models::record::{ExtractedFields, Field, NOT_AVAILABLE};

/// How one field was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMatch {
    /// The field.
    pub field: Field,
    /// Position of the winning rule among the field's rules, if any matched.
    pub rule_index: Option<usize>,
    /// The winning rule's pattern.
    pub pattern: Option<String>,
    /// Raw capture before cleaning.
    pub raw: Option<String>,
}

/// Result of extracting fields with per-field detail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted values.
    pub fields: ExtractedFields,
    /// Per-field resolution, in [`Field::EXTRACTED`] order.
    pub matches: Vec<FieldMatch>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Fields no rule matched.
    pub fn missing(&self) -> Vec<Field> {
        self.matches
            .iter()
            .filter(|m| m.rule_index.is_none())
            .map(|m| m.field)
            .collect()
    }
}

/// Extracts the comparison fields from document text.
///
/// For each field the rules are tried in order and the first one whose
/// capture is non-blank wins; a field with no winner is `"N/A"`.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    rules: Vec<FieldRule>,
}

impl FieldExtractor {
    /// Create an extractor with the built-in rules.
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Create an extractor with the built-in rules plus configured ones.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        Self::new().with_custom_rules(&config.custom_rules)
    }

    /// Append custom rules; each is tried after the existing rules of its field.
    pub fn with_custom_rules(mut self, custom: &[CustomRule]) -> Result<Self, ExtractionError> {
        for rule in custom {
            self.rules
                .push(FieldRule::parse(rule.field, &rule.pattern, rule.cleaner)?);
        }
        if !custom.is_empty() {
            debug!("Added {} custom rules", custom.len());
        }
        Ok(self)
    }

    /// Rules for one field, in priority order.
    pub fn rules_for(&self, field: Field) -> impl Iterator<Item = &FieldRule> + '_ {
        self.rules.iter().filter(move |r| r.field() == field)
    }

    /// Extract every field from `text`.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::default();
        for field in Field::EXTRACTED {
            if let Some(slot) = fields.slot_mut(field) {
                *slot = self
                    .rules_for(field)
                    .find_map(|rule| rule.apply(text))
                    .map(|m| m.value)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            }
        }
        fields
    }

    /// Extract every field and report which rule resolved each one.
    pub fn extract_detailed(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        info!("Extracting fields from {} characters of text", text.len());

        let mut fields = ExtractedFields::default();
        let mut matches = Vec::with_capacity(Field::EXTRACTED.len());

        for field in Field::EXTRACTED {
            let winner = self
                .rules_for(field)
                .enumerate()
                .find_map(|(index, rule)| rule.apply(text).map(|m| (index, rule, m)));

            match winner {
                Some((index, rule, found)) => {
                    debug!("{} matched rule {}: {:?}", field, index, found.raw);
                    if let Some(slot) = fields.slot_mut(field) {
                        *slot = found.value;
                    }
                    matches.push(FieldMatch {
                        field,
                        rule_index: Some(index),
                        pattern: Some(rule.pattern().to_string()),
                        raw: Some(found.raw),
                    });
                }
                None => {
                    debug!("{} not found", field);
                    matches.push(FieldMatch {
                        field,
                        rule_index: None,
                        pattern: None,
                        raw: None,
                    });
                }
            }
        }

        ExtractionResult {
            fields,
            matches,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::illustration::rules::Cleaner;
    use pretty_assertions::assert_eq;

    const QUOTED_ILLUSTRATION: &str = concat!(
        r#""Product Code","WL-10PAY" "Currency","USD" "Face Amount","","250,000" "#,
        r#""Annual Premium","$12,500.00" "Guaranteed Interest Rate","3.5%" "#,
        r#""Surrender Penalty Period","10 years" "S&P Rating","AA-""#,
        "\n",
        r#""Year 10","$91,234" "Year 20","$210,500" "Year 30","$388,000""#,
        "\n",
        "Total 10 Pay Premium: $125,000",
    );

    #[test]
    fn test_extract_quoted_illustration() {
        let fields = FieldExtractor::new().extract(QUOTED_ILLUSTRATION);

        assert_eq!(fields.product_code, "WL-10PAY");
        assert_eq!(fields.currency, "USD");
        assert_eq!(fields.face_amount, "250000");
        assert_eq!(fields.annual_premium, "12500.00");
        assert_eq!(fields.total_10_pay_premium, "125000");
        assert_eq!(fields.cash_value_year_10, "91234");
        assert_eq!(fields.cash_value_year_20, "210500");
        assert_eq!(fields.cash_value_year_30, "388000");
        assert_eq!(fields.guaranteed_interest_rate, "3.5%");
        assert_eq!(fields.surrender_penalty_period, "10 years");
        assert_eq!(fields.sp_rating, "AA-");
    }

    #[test]
    fn test_no_match_yields_not_available() {
        let fields = FieldExtractor::new().extract("Nothing useful in here.");
        assert_eq!(fields, ExtractedFields::default());
        assert_eq!(fields.missing(), Field::EXTRACTED.to_vec());
    }

    #[test]
    fn test_plain_text_issuer_layout() {
        let text = "Policy Summary Sum Insured: USD 500,000 Planned Premium $ 8,750.25 \
                    Year Age Premium Cumulative Cash Value \
                    10 45 8,750 87,502 61,000 11 46 8,750 96,252 70,300 \
                    20 55 0 87,502 140,900 30 65 0 87,502 260,000";
        let fields = FieldExtractor::new().extract(text);

        assert_eq!(fields.face_amount, "500000");
        assert_eq!(fields.annual_premium, "8750.25");
        assert_eq!(fields.cash_value_year_10, "61000");
        assert_eq!(fields.cash_value_year_20, "140900");
        assert_eq!(fields.cash_value_year_30, "260000");
        assert_eq!(fields.currency, NOT_AVAILABLE);
    }

    #[test]
    fn test_quoted_year_row_beats_ledger_row() {
        let text = "10 45 8,750 87,502 61,000\n\"Year 10\",\"$70,000\"";
        let result = FieldExtractor::new().extract_detailed(text);

        assert_eq!(result.fields.cash_value_year_10, "70000");
        let y10 = result
            .matches
            .iter()
            .find(|m| m.field == Field::CashValueYear10)
            .unwrap();
        assert_eq!(y10.rule_index, Some(0));
        assert_eq!(y10.raw.as_deref(), Some("70,000"));
    }

    #[test]
    fn test_quoted_year_row_without_ledger() {
        let fields = FieldExtractor::new().extract(r#""Year 10","","$45,600""#);
        assert_eq!(fields.cash_value_year_10, "45600");
        assert_eq!(fields.cash_value_year_20, NOT_AVAILABLE);
    }

    #[test]
    fn test_quoted_rows_with_text_cells() {
        let text = concat!(
            r#""Face Amount","Basic","250,000" "Currency","USD""#,
            "\n",
            r#""Year 10","45","$91,234" "Year 20","55","$210,500""#,
        );
        let fields = FieldExtractor::new().extract(text);

        assert_eq!(fields.face_amount, "250000");
        assert_eq!(fields.currency, "USD");
        assert_eq!(fields.cash_value_year_10, "91234");
        assert_eq!(fields.cash_value_year_20, "210500");
    }

    #[test]
    fn test_blank_quoted_value_falls_through() {
        let fields = FieldExtractor::new().extract(r#""Currency","  " "Product Code","""#);
        assert_eq!(fields.currency, NOT_AVAILABLE);
        assert_eq!(fields.product_code, NOT_AVAILABLE);
    }

    #[test]
    fn test_custom_rule_runs_after_builtins() {
        let extractor = FieldExtractor::new()
            .with_custom_rules(&[CustomRule {
                field: Field::SpRating,
                pattern: r"Rated\s+(\S+)\s+by S&P".to_string(),
                cleaner: Cleaner::Identity,
            }])
            .unwrap();

        assert_eq!(extractor.extract("Rated A+ by S&P").sp_rating, "A+");
        assert_eq!(
            extractor.extract(r#""S&P Rating","AA" Rated A+ by S&P"#).sp_rating,
            "AA"
        );
    }

    #[test]
    fn test_detailed_reports_missing_fields() {
        let result = FieldExtractor::new().extract_detailed(r#""Currency","SGD""#);
        assert_eq!(result.matches.len(), 11);
        assert_eq!(result.missing().len(), 10);
        assert!(!result.missing().contains(&Field::Currency));
    }
}
