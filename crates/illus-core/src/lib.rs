//! Core library for comparing financial illustration PDFs.
//!
//! This crate provides:
//! - PDF text extraction (per-page text joined into one document string)
//! - Rule-based field extraction (ordered patterns with fallback)
//! - The comparison table engine (sort, filter, derived view)
//! - PDF report rendering of the comparison table
//! - Batch processing with all-or-nothing semantics (`native` feature)

#[cfg(feature = "native")]
pub mod batch;
pub mod error;
pub mod illustration;
pub mod models;
pub mod pdf;
pub mod report;
pub mod table;

#[cfg(feature = "native")]
pub use batch::{BatchProcessor, ComparisonSession, DocumentSource};
pub use error::{IllusError, Result};
pub use illustration::{ExtractionResult, FieldExtractor};
pub use models::record::{ExtractedFields, ExtractedRecord, Field, NOT_AVAILABLE};
pub use pdf::{DocumentReader, PdfExtractor, PdfProcessor, PdfTextReader};
pub use report::{export_report, render_report, ExportOutcome};
pub use table::{view, ComparisonTable, SortConfig, SortDirection};
