//! WASM bindings for comparing financial illustrations.
//!
//! The browser extracts page text itself (e.g. with pdf.js) and hands it to
//! these bindings; field extraction, the comparison table and the PDF report
//! run here.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use illus_core::models::config::ReportConfig;
use illus_core::pdf::{join_pages, join_runs};
use illus_core::report::render_report;
use illus_core::{ExtractedRecord, Field, FieldExtractor, SortDirection};

/// Error message when exporting a table without visible rows.
const NO_DATA: &str = "No data to export";

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Records are flattened maps in serde; hand them to JS as plain objects.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a comparison record from document text.
#[wasm_bindgen]
pub fn extract_fields_from_text(file_name: &str, text: &str) -> Result<JsValue, JsValue> {
    let record = extract_record(file_name, text);
    to_js(&record)
}

/// Join per-page text into one document string.
///
/// Each page's lines are flattened with spaces; pages are separated by newlines.
#[wasm_bindgen]
pub fn join_page_texts(pages: js_sys::Array) -> String {
    let pages: Vec<String> = pages.iter().map(|p| p.as_string().unwrap_or_default()).collect();
    join_document(&pages)
}

fn extract_record(file_name: &str, text: &str) -> ExtractedRecord {
    ExtractedRecord::new(file_name, FieldExtractor::new().extract(text))
}

fn join_document(pages: &[String]) -> String {
    let pages: Vec<String> = pages.iter().map(|p| join_runs(p.lines())).collect();
    join_pages(&pages)
}

/// Comparison table state for browser use.
#[wasm_bindgen(js_name = ComparisonTable)]
#[derive(Default)]
pub struct ComparisonTableJs {
    table: illus_core::ComparisonTable,
    report: ReportConfig,
}

#[wasm_bindgen(js_class = ComparisonTable)]
impl ComparisonTableJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the batch with records produced by `extract_fields_from_text`.
    #[wasm_bindgen(js_name = setRecords)]
    pub fn set_records(&mut self, records: JsValue) -> Result<(), JsValue> {
        let records: Vec<ExtractedRecord> =
            serde_wasm_bindgen::from_value(records).map_err(js_error)?;
        self.table.replace_records(records);
        Ok(())
    }

    /// Drop the current batch.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Pick a sort column by record key; picking the active column flips direction.
    #[wasm_bindgen(js_name = selectSort)]
    pub fn select_sort(&mut self, key: &str) -> Result<(), JsValue> {
        let field: Field = key.parse().map_err(js_error)?;
        self.table.select_sort(field);
        Ok(())
    }

    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&mut self, filter: &str) {
        self.table.set_filter(filter);
    }

    /// Displayed rows, sorted and filtered.
    #[wasm_bindgen]
    pub fn rows(&self) -> Result<JsValue, JsValue> {
        to_js(&self.table.rows())
    }

    /// Displayed rows as a JSON string.
    #[wasm_bindgen(js_name = rowsJson)]
    pub fn rows_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.table.rows()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = sortKey)]
    pub fn sort_key(&self) -> String {
        self.table.sort().key.key().to_string()
    }

    #[wasm_bindgen(js_name = sortDescending)]
    pub fn sort_descending(&self) -> bool {
        self.table.sort().direction == SortDirection::Descending
    }

    /// Number of displayed rows.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.table.len()
    }

    /// Number of records in the batch, ignoring the filter.
    #[wasm_bindgen(getter)]
    pub fn total(&self) -> usize {
        self.table.total()
    }

    /// Render the displayed rows as PDF bytes.
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&self) -> Result<Vec<u8>, JsValue> {
        self.export_bytes().map_err(JsValue::from)
    }

    /// Report file name to offer for download.
    #[wasm_bindgen(js_name = reportFileName)]
    pub fn report_file_name(&self) -> String {
        self.report.file_name.clone()
    }
}

impl ComparisonTableJs {
    fn export_bytes(&self) -> Result<Vec<u8>, String> {
        let rows = self.table.rows();
        if rows.is_empty() {
            return Err(NO_DATA.to_string());
        }
        render_report(&rows, &self.report).map_err(|e| e.to_string())
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_and_show() {
        let record = extract_fields_from_text("plan.pdf", "\"Currency\",\"USD\"").unwrap();
        let records = js_sys::Array::of1(&record);

        let mut table = ComparisonTableJs::new();
        table.set_records(records.into()).unwrap();
        assert_eq!(table.length(), 1);
        assert!(table.rows_json().unwrap().contains("\"currency\":\"USD\""));
    }

    #[wasm_bindgen_test]
    fn test_records_are_plain_objects() {
        let record = extract_fields_from_text("plan.pdf", "\"Currency\",\"USD\"").unwrap();
        assert!(!record.is_instance_of::<js_sys::Map>());
        let currency = js_sys::Reflect::get(&record, &"currency".into()).unwrap();
        assert_eq!(currency.as_string().as_deref(), Some("USD"));

        let mut table = ComparisonTableJs::new();
        table.set_records(js_sys::Array::of1(&record).into()).unwrap();
        let rows = js_sys::Array::from(&table.rows().unwrap());
        let row = rows.get(0);
        assert!(!row.is_instance_of::<js_sys::Map>());
        let name = js_sys::Reflect::get(&row, &"fileName".into()).unwrap();
        assert_eq!(name.as_string().as_deref(), Some("plan.pdf"));
    }

    #[wasm_bindgen_test]
    fn test_unknown_sort_key() {
        let mut table = ComparisonTableJs::new();
        assert!(table.select_sort("premiumish").is_err());
    }

    #[wasm_bindgen_test]
    fn test_join_page_texts() {
        let pages = js_sys::Array::of2(&"a\nb".into(), &"c".into());
        assert_eq!(join_page_texts(pages), "a b\nc");
    }
}
