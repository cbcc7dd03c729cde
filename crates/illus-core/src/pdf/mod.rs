//! PDF text extraction.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextReader};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of a single page (1-indexed), runs joined by spaces.
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract the whole document as one string, pages separated by newlines.
    fn extract_text(&self) -> Result<String> {
        Ok(join_pages(&self.extract_pages()?))
    }
}

/// Turns raw document bytes into the text the field extractor runs on.
///
/// The batch runner only depends on this trait, so readers other than
/// [`PdfTextReader`] can stand in for it.
pub trait DocumentReader: Send + Sync {
    fn read_text(&self, data: &[u8]) -> Result<String>;
}

/// Join the text runs of one page with single spaces.
///
/// Line breaks inside a page become spaces so table rows and labelled values
/// that the PDF split across runs end up on one line.
pub fn join_runs<'a>(runs: impl IntoIterator<Item = &'a str>) -> String {
    runs.into_iter()
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join page texts with newlines.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a text-only PDF, one content stream per page.
#[cfg(test)]
pub(crate) fn test_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let mut content = String::from("BT /F1 10 Tf 50 750 Td 12 TL ");
        for line in text.lines() {
            content.push_str(&format!("({line}) Tj T* "));
        }
        content.push_str("ET");

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_runs_flattens_lines() {
        let page = "\"Face Amount\",\n\"250,000\"\n\n  Year  10 \n";
        assert_eq!(join_runs(page.lines()), "\"Face Amount\", \"250,000\" Year  10");
    }

    #[test]
    fn test_join_pages() {
        assert_eq!(join_pages(&["page one", "page two"]), "page one\npage two");
        assert_eq!(join_pages::<&str>(&[]), "");
    }
}
