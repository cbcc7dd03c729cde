//! Comparison table engine: sort and filter over extracted records.

mod filter;
mod sort;

pub use filter::matches_filter;
pub use sort::{compare_values, parse_number, SortConfig, SortDirection};

use std::sync::Arc;

use tracing::debug;

use crate::models::record::{ExtractedRecord, Field};

/// Derive the displayed rows: a stable sort by `sort`, then the filter.
///
/// Pure function of its inputs; records are never reordered in place, so
/// their original order breaks ties.
pub fn view<'a>(
    records: &'a [ExtractedRecord],
    sort: &SortConfig,
    filter: &str,
) -> Vec<&'a ExtractedRecord> {
    view_indices(records, sort, filter)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

fn view_indices(records: &[ExtractedRecord], sort: &SortConfig, filter: &str) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    indices.sort_by(|&a, &b| sort.compare(&records[a], &records[b]));

    if filter.is_empty() {
        return indices;
    }

    let needle = filter.to_lowercase();
    indices.retain(|&i| filter::matches_lowercase(&records[i], &needle));
    indices
}

/// Table state owned by the presentation layer.
///
/// Holds the current batch, the sort and the filter, and keeps the derived
/// view in step with them: every setter recomputes it.
#[derive(Debug, Clone)]
pub struct ComparisonTable {
    records: Arc<[ExtractedRecord]>,
    sort: SortConfig,
    filter: String,
    rows: Vec<usize>,
}

impl Default for ComparisonTable {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::<ExtractedRecord>::new()),
            sort: SortConfig::default(),
            filter: String::new(),
            rows: Vec::new(),
        }
    }
}

impl ComparisonTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a configured sort.
    pub fn with_sort(sort: SortConfig) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Replace the whole batch.
    pub fn replace_records(&mut self, records: impl Into<Arc<[ExtractedRecord]>>) {
        self.records = records.into();
        self.refresh();
    }

    /// Drop the current batch.
    pub fn clear(&mut self) {
        self.replace_records(Vec::<ExtractedRecord>::new());
    }

    /// Apply the column-selection policy (see [`SortConfig::select`]).
    pub fn select_sort(&mut self, key: Field) {
        self.set_sort(self.sort.select(key));
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        if sort != self.sort {
            self.sort = sort;
            self.refresh();
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        let filter = filter.into();
        if filter != self.filter {
            self.filter = filter;
            self.refresh();
        }
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    /// Displayed rows, sorted and filtered.
    pub fn rows(&self) -> Vec<&ExtractedRecord> {
        self.rows.iter().map(|&i| &self.records[i]).collect()
    }

    /// Number of displayed rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of records in the batch, ignoring the filter.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    fn refresh(&mut self) {
        self.rows = view_indices(&self.records, &self.sort, &self.filter);
        debug!(
            "Table view: {}/{} rows (sort {} {:?}, filter {:?})",
            self.rows.len(),
            self.records.len(),
            self.sort.key,
            self.sort.direction,
            self.filter
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::ExtractedFields;
    use pretty_assertions::assert_eq;

    fn record(name: &str, currency: &str, face: &str) -> ExtractedRecord {
        let mut fields = ExtractedFields::default();
        fields.currency = currency.to_string();
        fields.face_amount = face.to_string();
        ExtractedRecord::new(name, fields)
    }

    fn names(rows: &[&ExtractedRecord]) -> Vec<String> {
        rows.iter().map(|r| r.file_name().to_string()).collect()
    }

    fn batch() -> Vec<ExtractedRecord> {
        vec![
            record("c.pdf", "USD", "500000"),
            record("a.pdf", "SGD", "N/A"),
            record("d.pdf", "usd", "250000"),
            record("b.pdf", "HKD", "250000"),
        ]
    }

    #[test]
    fn test_default_view_sorts_by_file_name() {
        let records = batch();
        let rows = view(&records, &SortConfig::default(), "");
        assert_eq!(names(&rows), ["a.pdf", "b.pdf", "c.pdf", "d.pdf"]);
    }

    #[test]
    fn test_numeric_sort_is_stable_with_na_as_zero() {
        let records = batch();
        let asc = SortConfig::new(Field::FaceAmount, SortDirection::Ascending);
        assert_eq!(
            names(&view(&records, &asc, "")),
            ["a.pdf", "d.pdf", "b.pdf", "c.pdf"]
        );

        // Ties keep input order in both directions.
        let desc = SortConfig::new(Field::FaceAmount, SortDirection::Descending);
        assert_eq!(
            names(&view(&records, &desc, "")),
            ["c.pdf", "d.pdf", "b.pdf", "a.pdf"]
        );
    }

    #[test]
    fn test_filter_by_currency_code() {
        let records = batch();
        let rows = view(&records, &SortConfig::default(), "USD");
        assert_eq!(names(&rows), ["c.pdf", "d.pdf"]);
    }

    #[test]
    fn test_filter_without_matches() {
        let records = batch();
        assert!(view(&records, &SortConfig::default(), "EUR").is_empty());
    }

    #[test]
    fn test_view_does_not_reorder_input() {
        let records = batch();
        let _ = view(&records, &SortConfig::default(), "");
        assert_eq!(records[0].file_name(), "c.pdf");
    }

    #[test]
    fn test_table_state_recomputes_on_change() {
        let mut table = ComparisonTable::new();
        assert!(table.is_empty());

        table.replace_records(batch());
        assert_eq!(table.len(), 4);

        table.select_sort(Field::FaceAmount);
        assert_eq!(names(&table.rows())[0], "a.pdf");

        table.select_sort(Field::FaceAmount);
        assert_eq!(table.sort().direction, SortDirection::Descending);
        assert_eq!(names(&table.rows())[0], "c.pdf");

        table.set_filter("hkd");
        assert_eq!(names(&table.rows()), ["b.pdf"]);
        assert_eq!(table.total(), 4);

        table.replace_records(vec![record("z.pdf", "HKD", "1")]);
        assert_eq!(names(&table.rows()), ["z.pdf"]);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }
}
