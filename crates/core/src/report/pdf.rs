//! Minimal PDF 1.4 writer for tabular reports.
//!
//! Produces an A4 document with a title, a bold header row and one text line
//! per data row, breaking pages as needed. Text uses the standard Helvetica
//! fonts with WinAnsi encoding; characters outside Latin-1 are replaced by
//! `?`.

use super::{check_rows, find_template, ReportError, ReportGenerator, ReportTemplate};

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 40;
const TITLE_Y: u32 = 800;
const HEADER_Y: u32 = 770;
const FIRST_ROW_Y: u32 = 752;
const ROW_HEIGHT: u32 = 16;
const FOOTER_Y: u32 = 24;
const BODY_FONT_SIZE: u32 = 10;
/// Average Helvetica glyph width at `BODY_FONT_SIZE`, used to truncate cells.
const APPROX_GLYPH_WIDTH: f32 = 5.5;

/// Data rows that fit on one page.
pub const ROWS_PER_PAGE: usize = ((FIRST_ROW_Y - 2 * MARGIN) / ROW_HEIGHT) as usize + 1;

/// Object ids of the fixed objects; page objects follow.
const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

/// Built-in [`ReportGenerator`] writing PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReportGenerator;

impl ReportGenerator for PdfReportGenerator {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn generate(&self, template: &str, rows: &[Vec<String>]) -> Result<Vec<u8>, ReportError> {
        let template =
            find_template(template).ok_or_else(|| ReportError::UnknownTemplate(template.into()))?;
        check_rows(template, rows)?;

        let chunks: Vec<&[Vec<String>]> = if rows.is_empty() {
            vec![rows]
        } else {
            rows.chunks(ROWS_PER_PAGE).collect()
        };
        let page_count = chunks.len();

        let contents: Vec<Vec<u8>> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| page_content(template, chunk, i + 1, page_count))
            .collect();

        Ok(assemble(&contents))
    }
}

/// Render the content stream of one page.
fn page_content(template: &ReportTemplate, rows: &[Vec<String>], page: usize, of: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let columns = column_layout(template);

    push_text(&mut out, "F2", 16, MARGIN, TITLE_Y, template.title);

    for ((x, width), header) in columns.iter().zip(template.columns) {
        push_text(&mut out, "F2", BODY_FONT_SIZE, *x, HEADER_Y, &fit(header, *width));
    }
    // Rule under the header row.
    out.extend_from_slice(
        format!(
            "{MARGIN} {y} m {x2} {y} l S\n",
            y = HEADER_Y - 4,
            x2 = PAGE_WIDTH - MARGIN
        )
        .as_bytes(),
    );

    if rows.is_empty() {
        push_text(
            &mut out,
            "F1",
            BODY_FONT_SIZE,
            MARGIN,
            FIRST_ROW_Y,
            "Nenhum registro encontrado",
        );
    }

    for (i, row) in rows.iter().enumerate() {
        let y = FIRST_ROW_Y - i as u32 * ROW_HEIGHT;
        for ((x, width), cell) in columns.iter().zip(row) {
            push_text(&mut out, "F1", BODY_FONT_SIZE, *x, y, &fit(cell, *width));
        }
    }

    push_text(
        &mut out,
        "F1",
        8,
        MARGIN,
        FOOTER_Y,
        &format!("Página {page} de {of}"),
    );
    out
}

/// Starting x position and width of each column.
fn column_layout(template: &ReportTemplate) -> Vec<(u32, u32)> {
    let usable = PAGE_WIDTH - 2 * MARGIN;
    let total: u32 = template.widths.iter().sum::<u32>().max(1);
    let mut x = MARGIN;
    template
        .widths
        .iter()
        .map(|w| {
            let width = usable * w / total;
            let column = (x, width);
            x += width;
            column
        })
        .collect()
}

/// Truncate `text` so it fits in a column `width` points wide.
fn fit(text: &str, width: u32) -> String {
    let max_chars = ((width as f32 / APPROX_GLYPH_WIDTH) as usize).saturating_sub(1).max(1);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

fn push_text(out: &mut Vec<u8>, font: &str, size: u32, x: u32, y: u32, text: &str) {
    out.extend_from_slice(format!("BT /{font} {size} Tf {x} {y} Td (").as_bytes());
    push_escaped(out, text);
    out.extend_from_slice(b") Tj ET\n");
}

/// Append `text` as the body of a PDF literal string in WinAnsi encoding.
fn push_escaped(out: &mut Vec<u8>, text: &str) {
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\n' | '\r' | '\t' => out.push(b' '),
            c if (c as u32) < 0x80 => out.push(c as u8),
            c if (0xA0..=0xFF).contains(&(c as u32)) => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
}

/// Write the document skeleton around the page content streams.
fn assemble(contents: &[Vec<u8>]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let page_ids: Vec<usize> = (0..contents.len()).map(|i| FIRST_PAGE_ID + 2 * i).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut begin = |out: &mut Vec<u8>, id: usize| {
        offsets.push(out.len());
        out.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    };

    begin(&mut out, CATALOG_ID);
    out.extend_from_slice(format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>\nendobj\n").as_bytes());

    begin(&mut out, PAGES_ID);
    out.extend_from_slice(
        format!(
            "<< /Type /Pages /Kids [{kids}] /Count {} >>\nendobj\n",
            contents.len()
        )
        .as_bytes(),
    );

    begin(&mut out, FONT_REGULAR_ID);
    out.extend_from_slice(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n",
    );

    begin(&mut out, FONT_BOLD_ID);
    out.extend_from_slice(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n",
    );

    for (page_id, content) in page_ids.iter().zip(contents) {
        let content_id = page_id + 1;

        begin(&mut out, *page_id);
        out.extend_from_slice(
            format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 {FONT_REGULAR_ID} 0 R /F2 {FONT_BOLD_ID} 0 R >> >> \
                 /Contents {content_id} 0 R >>\nendobj\n"
            )
            .as_bytes(),
        );

        begin(&mut out, content_id);
        out.extend_from_slice(format!("<< /Length {} >>\nstream\n", content.len()).as_bytes());
        out.extend_from_slice(content);
        out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    let xref_offset = out.len();
    let object_count = offsets.len() + 1;
    out.extend_from_slice(format!("xref\n0 {object_count}\n0000000000 65535 f \n").as_bytes());
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {object_count} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::report::PERSON_REPORT;

    fn row(name: &str) -> Vec<String> {
        vec![
            "1".into(),
            name.into(),
            "F".into(),
            "Analista".into(),
            "Pleno".into(),
        ]
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn page_count(pdf: &[u8]) -> usize {
        let text = String::from_utf8_lossy(pdf);
        text.matches("/Type /Page ").count()
    }

    #[test]
    fn produces_well_formed_envelope() {
        let pdf = PdfReportGenerator.generate(PERSON_REPORT, &[row("Ana")]).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(contains(&pdf, b"(Ana) Tj"));
    }

    #[test]
    fn startxref_points_at_xref_table() {
        let pdf = PdfReportGenerator.generate(PERSON_REPORT, &[row("Ana")]).unwrap();
        let text = String::from_utf8_lossy(&pdf);
        let tail = text.rsplit("startxref\n").next().unwrap();
        let offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(pdf[offset..].starts_with(b"xref\n"));
    }

    #[test]
    fn escapes_parentheses_and_encodes_latin1() {
        let pdf = PdfReportGenerator
            .generate(PERSON_REPORT, &[row("Jo(ã)o")])
            .unwrap();
        assert!(contains(&pdf, b"(Jo\\(\xE3\\)o) Tj"));
    }

    #[test]
    fn breaks_pages_when_rows_overflow() {
        let rows: Vec<_> = (0..ROWS_PER_PAGE + 1).map(|i| row(&format!("P{i}"))).collect();
        let pdf = PdfReportGenerator.generate(PERSON_REPORT, &rows).unwrap();
        assert_eq!(page_count(&pdf), 2);
        assert!(contains(&pdf, b"/Count 2"));
    }

    #[test]
    fn empty_report_has_single_page_with_notice() {
        let pdf = PdfReportGenerator.generate(PERSON_REPORT, &[]).unwrap();
        assert_eq!(page_count(&pdf), 1);
        assert!(contains(&pdf, b"(Nenhum registro encontrado) Tj"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(300);
        assert!(fit(&long, 100).ends_with("..."));
        assert!(fit(&long, 100).chars().count() < 20);
        assert_eq!(fit("short", 100), "short");
    }

    #[test]
    fn unknown_template_is_rejected() {
        let result = PdfReportGenerator.generate("missing", &[]);
        assert_matches!(result, Err(ReportError::UnknownTemplate(name)) if name == "missing");
    }
}
