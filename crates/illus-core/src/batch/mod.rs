//! Concurrent batch extraction with all-or-nothing results.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::try_join_all;
use tracing::{debug, error, info};

use crate::error::{BatchError, IllusError};
use crate::illustration::FieldExtractor;
use crate::models::config::IllusConfig;
use crate::models::record::ExtractedRecord;
use crate::pdf::{DocumentReader, PdfTextReader};
use crate::table::ComparisonTable;

/// Message reported when any document of a batch fails.
pub const BATCH_FAILED: &str =
    "Failed to process one or more files. Check that every file is a readable PDF and try again.";

/// One document of a batch.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Read from disk when the batch runs.
    Path(PathBuf),
    /// Already in memory.
    Bytes { name: String, data: Vec<u8> },
}

impl DocumentSource {
    pub fn bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        DocumentSource::Bytes {
            name: name.into(),
            data,
        }
    }

    /// Display name; becomes the record's file name.
    pub fn name(&self) -> String {
        match self {
            DocumentSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            DocumentSource::Bytes { name, .. } => name.clone(),
        }
    }

    async fn into_bytes(self) -> std::io::Result<Vec<u8>> {
        match self {
            DocumentSource::Path(path) => tokio::fs::read(&path).await,
            DocumentSource::Bytes { data, .. } => Ok(data),
        }
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(path: PathBuf) -> Self {
        DocumentSource::Path(path)
    }
}

/// Runs one extraction task per document and joins them.
///
/// A batch either yields a record for every document, in input order, or a
/// single [`BatchError`]. Only one batch may be in flight at a time.
pub struct BatchProcessor<R = PdfTextReader> {
    reader: Arc<R>,
    extractor: Arc<FieldExtractor>,
    busy: AtomicBool,
}

impl BatchProcessor<PdfTextReader> {
    /// PDF reader and extractor built from configuration.
    pub fn from_config(config: &IllusConfig) -> Result<Self, IllusError> {
        let extractor = FieldExtractor::from_config(&config.extraction)?;
        Ok(Self::new(PdfTextReader::new(config.pdf.clone()), extractor))
    }
}

impl<R: DocumentReader + 'static> BatchProcessor<R> {
    pub fn new(reader: R, extractor: FieldExtractor) -> Self {
        Self {
            reader: Arc::new(reader),
            extractor: Arc::new(extractor),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a batch is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Process every document concurrently.
    ///
    /// Returns [`BatchError::Busy`] if another batch is running. If any
    /// document fails the remaining results are discarded; the per-file
    /// cause is only logged.
    pub async fn run(&self, sources: Vec<DocumentSource>) -> Result<Vec<ExtractedRecord>, BatchError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let start = Instant::now();
        let count = sources.len();
        info!("Processing batch of {} documents", count);

        let tasks = sources.into_iter().map(|source| self.process(source));
        let records = try_join_all(tasks).await?;

        info!(
            "Batch of {} documents processed in {}ms",
            count,
            start.elapsed().as_millis()
        );
        Ok(records)
    }

    async fn process(&self, source: DocumentSource) -> Result<ExtractedRecord, BatchError> {
        let name = source.name();
        let data = source.into_bytes().await.map_err(|e| {
            error!("Failed to read {}: {}", name, e);
            BatchError::Processing(BATCH_FAILED.to_string())
        })?;

        let reader = Arc::clone(&self.reader);
        let extractor = Arc::clone(&self.extractor);
        let task_name = name.clone();
        let fields = tokio::task::spawn_blocking(move || {
            let text = reader.read_text(&data)?;
            debug!("{}: {} characters of text", task_name, text.len());
            Ok::<_, crate::error::PdfError>(extractor.extract(&text))
        })
        .await
        .map_err(|e| {
            error!("Extraction task for {} did not complete: {}", name, e);
            BatchError::Task(BATCH_FAILED.to_string())
        })?
        .map_err(|e| {
            error!("Failed to extract text from {}: {}", name, e);
            BatchError::Processing(BATCH_FAILED.to_string())
        })?;

        Ok(ExtractedRecord::new(name, fields))
    }
}

/// Clears the busy flag when a run ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, BatchError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BatchError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A processor and the table it feeds.
pub struct ComparisonSession<R = PdfTextReader> {
    processor: BatchProcessor<R>,
    table: ComparisonTable,
}

impl<R: DocumentReader + 'static> ComparisonSession<R> {
    pub fn new(processor: BatchProcessor<R>, table: ComparisonTable) -> Self {
        Self { processor, table }
    }

    pub fn table(&self) -> &ComparisonTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ComparisonTable {
        &mut self.table
    }

    pub fn processor(&self) -> &BatchProcessor<R> {
        &self.processor
    }

    /// Replace the table contents with a new batch.
    ///
    /// The previous batch is dropped before processing starts, so a failed
    /// upload leaves the table empty. Returns the number of records loaded.
    pub async fn upload(&mut self, sources: Vec<DocumentSource>) -> Result<usize, BatchError> {
        self.table.clear();
        let records = self.processor.run(sources).await?;
        let count = records.len();
        self.table.replace_records(records);
        Ok(count)
    }
}
