//! Free-text record filter.

use crate::models::record::ExtractedRecord;

/// Case-insensitive substring match over every column of a record.
pub fn matches_filter(record: &ExtractedRecord, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    matches_lowercase(record, &needle)
}

/// Same as [`matches_filter`] with the needle already lowercased.
pub(crate) fn matches_lowercase(record: &ExtractedRecord, needle: &str) -> bool {
    record
        .values()
        .any(|value| value.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::ExtractedFields;

    #[test]
    fn test_matches_any_column() {
        let mut fields = ExtractedFields::default();
        fields.currency = "USD".to_string();
        fields.sp_rating = "AA-".to_string();
        let record = ExtractedRecord::new("Alpha Life.pdf", fields);

        assert!(matches_filter(&record, ""));
        assert!(matches_filter(&record, "usd"));
        assert!(matches_filter(&record, "aa-"));
        assert!(matches_filter(&record, "ALPHA"));
        assert!(matches_filter(&record, "n/a"));
        assert!(!matches_filter(&record, "SGD"));
    }
}
