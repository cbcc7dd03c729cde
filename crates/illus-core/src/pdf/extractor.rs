//! PDF text extraction using lopdf, with pdf-extract as fallback.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{join_runs, DocumentReader, PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    config: PdfConfig,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create an extractor with explicit settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            config,
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Whole-document text from pdf-extract, flattened into a single page.
    fn fallback_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(join_runs(text.lines()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.config.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        trace!("Page {}: {} chars", page, text.len());

        Ok(join_runs(text.lines()))
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let mut pages = Vec::with_capacity(page_count as usize);
        for page in 1..=page_count {
            match self.extract_page_text(page) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page, e);
                    pages.push(String::new());
                }
            }
        }

        let has_text = pages.iter().any(|p| !p.trim().is_empty());
        if !has_text && self.config.fallback_to_pdf_extract {
            debug!("lopdf found no text, falling back to pdf-extract");
            return Ok(vec![self.fallback_text()?]);
        }

        debug!(
            "Extracted {} pages, {} chars",
            pages.len(),
            pages.iter().map(String::len).sum::<usize>()
        );
        Ok(pages)
    }
}

/// [`DocumentReader`] backed by a fresh [`PdfExtractor`] per document.
#[derive(Debug, Clone, Default)]
pub struct PdfTextReader {
    config: PdfConfig,
}

impl PdfTextReader {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }
}

impl DocumentReader for PdfTextReader {
    fn read_text(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::with_config(self.config.clone());
        extractor.load(data)?;
        extractor.extract_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_pdf;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_pages().is_err());
    }

    #[test]
    fn test_reader_rejects_non_pdf() {
        let reader = PdfTextReader::default();
        let result = reader.read_text(b"this is not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_page_text_requires_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_page_text(1), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_extract_pages_in_order() {
        let data = test_pdf(&["\"Currency\",\"USD\"", "Year 10 page"]);
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();

        assert_eq!(extractor.page_count(), 2);
        let pages = extractor.extract_pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("\"Currency\",\"USD\""));
        assert!(pages[1].contains("Year 10"));
        assert!(matches!(extractor.extract_page_text(3), Err(PdfError::InvalidPage(3))));
    }

    #[test]
    fn test_lines_of_a_page_are_joined_with_spaces() {
        let data = test_pdf(&["\"Face Amount\",\n\"250,000\""]);
        let text = PdfTextReader::default().read_text(&data).unwrap();

        assert!(!text.contains('\n'));
        assert!(text.contains("\"Face Amount\","));
        assert!(text.contains("\"250,000\""));
    }
}
