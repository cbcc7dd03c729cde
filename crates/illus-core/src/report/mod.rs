//! PDF export of the displayed comparison rows.

mod pdf;

pub use pdf::render_report;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ReportError;
use crate::models::config::ReportConfig;
use crate::models::record::ExtractedRecord;

/// What an export did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The report was written to this path.
    Written(PathBuf),
    /// There were no rows; nothing was written.
    NoData,
}

/// Render `rows` and write them to `dir` under the configured file name.
///
/// An empty row set is not an error: no file is produced and
/// [`ExportOutcome::NoData`] is returned.
pub fn export_report(
    rows: &[&ExtractedRecord],
    config: &ReportConfig,
    dir: &Path,
) -> Result<ExportOutcome, ReportError> {
    if rows.is_empty() {
        info!("No rows to export");
        return Ok(ExportOutcome::NoData);
    }

    let bytes = render_report(rows, config)?;
    let path = dir.join(&config.file_name);
    std::fs::write(&path, &bytes)?;

    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(ExportOutcome::Written(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::ExtractedFields;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_pdf() {
        let dir = TempDir::new().unwrap();
        let record = ExtractedRecord::new("plan.pdf", ExtractedFields::default());
        let config = ReportConfig::default();

        let outcome = export_report(&[&record], &config, dir.path()).unwrap();
        let path = dir.path().join("illustration-comparison.pdf");
        assert_eq!(outcome, ExportOutcome::Written(path.clone()));

        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_without_rows_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let outcome = export_report(&[], &ReportConfig::default(), dir.path()).unwrap();

        assert_eq!(outcome, ExportOutcome::NoData);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let record = ExtractedRecord::new("plan.pdf", ExtractedFields::default());
        let missing = dir.path().join("nope");

        let err = export_report(&[&record], &ReportConfig::default(), &missing).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
