//! Tabular report generation.
//!
//! A [`ReportGenerator`] turns rows of text cells into a binary document
//! using a named [`ReportTemplate`]. [`PdfReportGenerator`] is the built-in
//! implementation; callers hold it as `Arc<dyn ReportGenerator>` so tests can
//! substitute their own.

mod pdf;

pub use pdf::PdfReportGenerator;

/// Identifier of the person listing report.
pub const PERSON_REPORT: &str = "pessoa";

/// Download filename used when streaming a generated report.
pub const REPORT_FILE_NAME: &str = "relatorio.pdf";

/// Layout description of a report: its title and column headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTemplate {
    pub name: &'static str,
    pub title: &'static str,
    pub columns: &'static [&'static str],
    /// Relative column widths; must have the same length as `columns`.
    pub widths: &'static [u32],
}

/// Templates known to the built-in generator.
pub const TEMPLATES: &[ReportTemplate] = &[ReportTemplate {
    name: PERSON_REPORT,
    title: "Relatório de Pessoas",
    columns: &["Id", "Nome", "Sexo", "Profissão", "Cargo"],
    widths: &[1, 5, 2, 4, 2],
}];

/// Look up a template by identifier.
pub fn find_template(name: &str) -> Option<&'static ReportTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// Errors raised while generating a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Unknown report template '{0}'")]
    UnknownTemplate(String),

    #[error("Row {row} has {actual} cells, template '{template}' expects {expected}")]
    RowShape {
        template: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Produces a binary document from a template identifier and rows of cells.
pub trait ReportGenerator: Send + Sync {
    /// MIME type of the generated document.
    fn content_type(&self) -> &'static str;

    fn generate(&self, template: &str, rows: &[Vec<String>]) -> Result<Vec<u8>, ReportError>;
}

/// Check that every row has one cell per template column.
fn check_rows(template: &ReportTemplate, rows: &[Vec<String>]) -> Result<(), ReportError> {
    let expected = template.columns.len();
    match rows.iter().position(|r| r.len() != expected) {
        Some(row) => Err(ReportError::RowShape {
            template: template.name,
            row,
            expected,
            actual: rows[row].len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn person_template_is_registered() {
        let template = find_template(PERSON_REPORT).expect("person template exists");
        assert_eq!(template.columns.len(), template.widths.len());
    }

    #[test]
    fn unknown_template_is_not_found() {
        assert!(find_template("nope").is_none());
    }

    #[test]
    fn check_rows_reports_first_bad_row() {
        let template = find_template(PERSON_REPORT).unwrap();
        let good = vec!["1".to_string(); 5];
        let bad = vec!["1".to_string(); 2];
        let result = check_rows(template, &[good, bad]);
        assert_matches!(
            result,
            Err(ReportError::RowShape {
                row: 1,
                expected: 5,
                actual: 2,
                ..
            })
        );
    }
}
