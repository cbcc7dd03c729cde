//! Error types for the illus-core library.

use thiserror::Error;

/// Main error type for the illus library.
#[derive(Error, Debug)]
pub enum IllusError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Extraction rule error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Batch processing error.
    #[error("{0}")]
    Batch(#[from] BatchError),

    /// Report rendering error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to extraction rules.
///
/// Running the rules over text never fails; these come from building
/// rules out of configuration.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A configured pattern is not usable as a field rule.
    #[error("invalid pattern for {field}: {reason}")]
    InvalidPattern { field: String, reason: String },

    /// A configured rule names a field that does not exist or cannot be extracted.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Errors related to batch processing.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Another batch is still being processed.
    #[error("a batch is already being processed")]
    Busy,

    /// At least one document in the batch failed; the whole batch is discarded.
    #[error("{0}")]
    Processing(String),

    /// A worker task could not be joined.
    #[error("{0}")]
    Task(String),
}

/// Errors related to report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The PDF library failed to build or serialize the report.
    #[error("failed to render report: {0}")]
    Render(String),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the illus library.
pub type Result<T> = std::result::Result<T, IllusError>;
