//! Amount cleaning.

/// Strip `$` and thousands separators, then trim.
///
/// The result is not checked to be numeric; "N/A"-style leftovers are
/// handled by the table's numeric comparison.
pub fn clean_currency(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_currency() {
        assert_eq!(clean_currency("250,000"), "250000");
        assert_eq!(clean_currency(" $1,234.56 "), "1234.56");
        assert_eq!(clean_currency("$ 12,000"), "12000");
        assert_eq!(clean_currency("N/A"), "N/A");
    }
}
