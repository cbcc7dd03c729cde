//! Configuration structures for the comparison pipeline.

use serde::{Deserialize, Serialize};

use crate::illustration::rules::Cleaner;
use crate::models::record::Field;
use crate::table::{SortConfig, SortDirection};

/// Main configuration for illus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IllusConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Initial table state.
    pub table: TableConfig,

    /// PDF report configuration.
    pub report: ReportConfig,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try the empty user password on encrypted documents.
    pub decrypt_empty_password: bool,

    /// Use pdf-extract when lopdf finds no text on any page.
    pub fallback_to_pdf_extract: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            fallback_to_pdf_extract: true,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extra rules, tried after the built-in rules of their field.
    pub custom_rules: Vec<CustomRule>,
}

/// A user-supplied field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    /// Target field (record key, e.g. `"faceAmount"`).
    pub field: Field,

    /// Regular expression with exactly one capture group.
    pub pattern: String,

    /// Cleaning applied to the capture.
    #[serde(default)]
    pub cleaner: Cleaner,
}

/// Initial sort applied to the comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Column to sort by.
    pub sort_key: Field,

    /// Sort direction.
    pub sort_direction: SortDirection,
}

impl Default for TableConfig {
    fn default() -> Self {
        let sort = SortConfig::default();
        Self {
            sort_key: sort.key,
            sort_direction: sort.direction,
        }
    }
}

impl TableConfig {
    /// The configured sort as a [`SortConfig`].
    pub fn sort(&self) -> SortConfig {
        SortConfig::new(self.sort_key, self.sort_direction)
    }
}

/// PDF report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output file name.
    pub file_name: String,

    /// Title printed on the first page and stored in the document info.
    pub title: String,

    /// Body font size in points.
    pub font_size: f32,

    /// Header row font size in points.
    pub header_font_size: f32,

    /// Height of a table row in millimetres.
    pub row_height_mm: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_name: "illustration-comparison.pdf".to_string(),
            title: "Illustration Comparison".to_string(),
            font_size: 7.0,
            header_font_size: 7.0,
            row_height_mm: 6.0,
        }
    }
}

impl IllusConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
