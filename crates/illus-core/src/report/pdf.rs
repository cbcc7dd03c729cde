//! Landscape PDF rendering of the comparison table via printpdf.

use std::io::BufWriter;

use chrono::Local;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use tracing::debug;

use crate::error::ReportError;
use crate::models::config::ReportConfig;
use crate::models::record::{ExtractedRecord, Field};

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 10.0;
const BOTTOM: f32 = 16.0;
const HEADER_LINE_HEIGHT: f32 = 3.5;

/// Column widths in millimetres, in [`Field::ALL`] order.
const COLUMN_WIDTHS: [f32; 12] = [
    40.0, 22.0, 15.0, 22.0, 22.0, 24.0, 22.0, 22.0, 22.0, 22.0, 24.0, 18.0,
];

/// Approximate Helvetica glyph width in millimetres per point of font size.
const GLYPH_MM_PER_PT: f32 = 0.194;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render rows as a PDF table. Returns PDF bytes.
///
/// The header row is repeated on every page.
pub fn render_report(rows: &[&ExtractedRecord], config: &ReportConfig) -> Result<Vec<u8>, ReportError> {
    let (doc, page1, layer1) = PdfDocument::new(
        &config.title,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(format!("font error: {e}")))?,
    };

    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let mut page_number = 1;
    let mut layer = doc.get_page(page1).get_layer(layer1);

    // Title block on the first page only
    let mut y = PAGE_HEIGHT - MARGIN - 4.0;
    layer.use_text(pdf_text(&config.title), 12.0, Mm(MARGIN), Mm(y), &fonts.bold);
    y -= 6.0;
    layer.use_text(
        format!("{} illustration(s) compared", rows.len()),
        8.0,
        Mm(MARGIN),
        Mm(y),
        &fonts.regular,
    );
    y -= 8.0;

    y = draw_header(&layer, &fonts, config, y);
    draw_footer(&layer, &fonts, page_number, &generated);

    for record in rows {
        if y - config.row_height_mm < BOTTOM {
            page_number += 1;
            let (page, page_layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}", page_number),
            );
            layer = doc.get_page(page).get_layer(page_layer);
            y = draw_header(&layer, &fonts, config, PAGE_HEIGHT - MARGIN - 4.0);
            draw_footer(&layer, &fonts, page_number, &generated);
        }

        draw_row(&layer, &fonts, config, record, y);
        y -= config.row_height_mm;
    }

    debug!("Rendered report: {} rows on {} pages", rows.len(), page_number);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Render(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Render(format!("buffer error: {e}")))
}

/// Draw the column headers starting at `y`; returns the baseline of the first row.
fn draw_header(layer: &PdfLayerReference, fonts: &Fonts, config: &ReportConfig, y: f32) -> f32 {
    let mut x = MARGIN;
    let mut lines_used = 1;

    for (field, width) in Field::ALL.iter().zip(COLUMN_WIDTHS) {
        let lines = wrap_text(field.header(), max_chars(width, config.header_font_size));
        for (i, line) in lines.iter().enumerate() {
            layer.use_text(
                pdf_text(line),
                config.header_font_size,
                Mm(x),
                Mm(y - i as f32 * HEADER_LINE_HEIGHT),
                &fonts.bold,
            );
        }
        lines_used = lines_used.max(lines.len());
        x += width;
    }

    y - lines_used as f32 * HEADER_LINE_HEIGHT - 3.0
}

fn draw_row(layer: &PdfLayerReference, fonts: &Fonts, config: &ReportConfig, record: &ExtractedRecord, y: f32) {
    let mut x = MARGIN;
    for (value, width) in record.values().zip(COLUMN_WIDTHS) {
        let cell = truncate(value, max_chars(width, config.font_size));
        layer.use_text(pdf_text(&cell), config.font_size, Mm(x), Mm(y), &fonts.regular);
        x += width;
    }
}

fn draw_footer(layer: &PdfLayerReference, fonts: &Fonts, page_number: usize, generated: &str) {
    layer.use_text(
        format!("Generated {}", generated),
        7.0,
        Mm(MARGIN),
        Mm(8.0),
        &fonts.regular,
    );
    layer.use_text(
        format!("Page {}", page_number),
        7.0,
        Mm(PAGE_WIDTH - MARGIN - 15.0),
        Mm(8.0),
        &fonts.regular,
    );
}

/// How many characters fit in a column of `width` mm at `font_size` pt.
fn max_chars(width: f32, font_size: f32) -> usize {
    let usable = (width - 1.5).max(1.0);
    ((usable / (GLYPH_MM_PER_PT * font_size)).floor() as usize).max(1)
}

/// Shorten `text` to `max` characters, marking the cut with "..".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 2 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 2).collect();
    cut.push_str("..");
    cut
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Builtin fonts only cover WinAnsi; anything outside printable ASCII becomes '?'.
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::ExtractedFields;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long file name.pdf", 10), "a very l..");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_wrap_header() {
        assert_eq!(wrap_text("Total 10 Pay Premium", 12), ["Total 10 Pay", "Premium"]);
        assert_eq!(wrap_text("Currency", 12), ["Currency"]);
    }

    #[test]
    fn test_columns_fit_landscape_page() {
        let total: f32 = COLUMN_WIDTHS.iter().sum();
        assert!(total <= PAGE_WIDTH - 2.0 * MARGIN);
    }

    #[test]
    fn test_pdf_text_replaces_non_ascii() {
        assert_eq!(pdf_text("Prämie €"), "Pr?mie ?");
    }

    #[test]
    fn test_render_spans_pages() {
        let records: Vec<ExtractedRecord> = (0..80)
            .map(|i| ExtractedRecord::new(format!("plan-{i}.pdf"), ExtractedFields::default()))
            .collect();
        let rows: Vec<&ExtractedRecord> = records.iter().collect();

        let bytes = render_report(&rows, &ReportConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
