//! Regex patterns for illustration field extraction.
//!
//! Every pattern has exactly one capture group. Amount captures always end
//! in a digit; `$` and thousands separators are removed by the cleaner.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Quoted label/value layout: "Label","value"
    pub static ref PRODUCT_CODE_QUOTED: Regex = Regex::new(
        r#""Product Code"\s*,\s*"([^"]*)""#
    ).unwrap();

    pub static ref CURRENCY_QUOTED: Regex = Regex::new(
        r#""Currency"\s*,\s*"([^"]*)""#
    ).unwrap();

    pub static ref GUARANTEED_RATE_QUOTED: Regex = Regex::new(
        r#""Guaranteed (?:Interest |Crediting )?Rate"\s*,\s*"([^"]*)""#
    ).unwrap();

    pub static ref SURRENDER_PERIOD_QUOTED: Regex = Regex::new(
        r#""Surrender (?:Penalty|Charge) Period"\s*,\s*"([^"]*)""#
    ).unwrap();

    pub static ref SP_RATING_QUOTED: Regex = Regex::new(
        r#""S&P (?:Financial Strength )?Rating"\s*,\s*"([^"]*)""#
    ).unwrap();

    // Quoted table rows: label cell, then the last amount cell of the comma-joined row
    pub static ref FACE_AMOUNT_QUOTED: Regex = Regex::new(
        r#""Face Amount"\s*,(?:\s*"[^"]*"\s*,)*\s*"(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)\s*""#
    ).unwrap();

    pub static ref ANNUAL_PREMIUM_QUOTED: Regex = Regex::new(
        r#""Annual Premium"\s*,(?:\s*"[^"]*"\s*,)*\s*"(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)\s*""#
    ).unwrap();

    pub static ref CASH_VALUE_Y10_QUOTED: Regex = Regex::new(
        r#""Year 10"\s*,(?:\s*"[^"]*"\s*,)*\s*"(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)\s*""#
    ).unwrap();

    pub static ref CASH_VALUE_Y20_QUOTED: Regex = Regex::new(
        r#""Year 20"\s*,(?:\s*"[^"]*"\s*,)*\s*"(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)\s*""#
    ).unwrap();

    pub static ref CASH_VALUE_Y30_QUOTED: Regex = Regex::new(
        r#""Year 30"\s*,(?:\s*"[^"]*"\s*,)*\s*"(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)\s*""#
    ).unwrap();

    // Plain-text labels used by different issuers
    pub static ref FACE_AMOUNT_LABEL: Regex = Regex::new(
        r"(?i)\bFace Amount\s*[:\-]?\s*(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref SUM_ASSURED_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Basic |Initial )?Sum (?:Assured|Insured)\s*[:\-]?\s*(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref SPECIFIED_AMOUNT_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Specified Amount|Initial Death Benefit)\s*[:\-]?\s*(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref ANNUAL_PREMIUM_LABEL: Regex = Regex::new(
        r"(?i)\bAnnual(?:ized)? Premium\s*[:\-]?\s*(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref PLANNED_PREMIUM_LABEL: Regex = Regex::new(
        r"(?i)\bPlanned (?:Annual )?Premium\s*[:\-]?\s*(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref YEARLY_PREMIUM_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Yearly|Annual Modal) Premium\s*[:\-]?\s*(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref TOTAL_10_PAY_PREMIUM_LABEL: Regex = Regex::new(
        r"(?i)\bTotal (?:10|Ten)[- ]Pay Premiums?\s*[:\-]?\s*(?:[A-Z]{3}\s*)?\$?\s*([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    // Fixed-width ledger rows:
    // <policy year> <age> <annual premium> <cumulative premium> <cash value>
    pub static ref CASH_VALUE_Y10_LEDGER: Regex = Regex::new(
        r"(?:^|\s)10\s+\d{2}\s+(?:\$?[\d,]*\d(?:\.\d+)?\s+){2}\$?([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref CASH_VALUE_Y20_LEDGER: Regex = Regex::new(
        r"(?:^|\s)20\s+\d{2}\s+(?:\$?[\d,]*\d(?:\.\d+)?\s+){2}\$?([\d,]*\d(?:\.\d+)?)"
    ).unwrap();

    pub static ref CASH_VALUE_Y30_LEDGER: Regex = Regex::new(
        r"(?:^|\s)30\s+\d{2}\s+(?:\$?[\d,]*\d(?:\.\d+)?\s+){2}\$?([\d,]*\d(?:\.\d+)?)"
    ).unwrap();
}
