//! Sort configuration and record comparison.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::record::{ExtractedRecord, Field};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Field,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: Field::FileName,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortConfig {
    pub fn new(key: Field, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort config after the user picks a column: the active column flips
    /// direction, any other column starts ascending.
    pub fn select(self, key: Field) -> Self {
        if key == self.key {
            Self::new(key, self.direction.toggle())
        } else {
            Self::new(key, SortDirection::Ascending)
        }
    }

    /// Compare two records under this config.
    pub fn compare(&self, a: &ExtractedRecord, b: &ExtractedRecord) -> Ordering {
        let ordering = compare_values(self.key, a.get(self.key), b.get(self.key));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Compare two column values: numerically for numeric columns, otherwise
/// as case-insensitive text.
pub fn compare_values(field: Field, a: &str, b: &str) -> Ordering {
    if field.is_numeric() {
        let (a, b) = (parse_number(a), parse_number(b));
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    } else {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}

/// Parse the longest leading decimal number of `s`, ignoring leading
/// whitespace. Anything without a leading number (e.g. `"N/A"`) is `0.0`.
pub fn parse_number(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Optional exponent, only taken when complete.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
