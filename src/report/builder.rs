//! Report formatting

use crate::schema::RuleTable;
use crate::source::SourceError;
use crate::validator::{ColumnErrors, DatasetReport, RowReport};

/// Warning emitted once when data rows follow an empty row
pub const EMPTY_ROWS_WARNING: &str = "file contains empty rows between rows with data";

/// Terminal result of processing one dataset
#[derive(Debug, Clone)]
pub enum DatasetOutcome {
    /// Rows were read and validated
    Validated(DatasetReport),
    /// The dataset could not be read
    Skipped { dataset: String, cause: SourceError },
}

impl DatasetOutcome {
    pub fn dataset(&self) -> &str {
        match self {
            DatasetOutcome::Validated(report) => &report.dataset,
            DatasetOutcome::Skipped { dataset, .. } => dataset,
        }
    }
}

/// Turns dataset outcomes into report lines.
///
/// Column names come from the rule table; column numbers are 1-based.
pub struct ReportBuilder<'a> {
    rules: &'a RuleTable,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    /// Report lines for any outcome
    pub fn build(&self, outcome: &DatasetOutcome) -> Vec<String> {
        match outcome {
            DatasetOutcome::Validated(report) => self.build_report(report),
            DatasetOutcome::Skipped { cause, .. } => cause.report_lines(),
        }
    }

    /// Report lines for a validated dataset
    pub fn build_report(&self, report: &DatasetReport) -> Vec<String> {
        let mut lines: Vec<String> = report
            .header_mismatches
            .iter()
            .map(ToString::to_string)
            .collect();

        for row in &report.rows {
            self.push_row(&mut lines, row);
        }

        lines.push(String::new());
        if report.empty_row_before_end {
            lines.push(EMPTY_ROWS_WARNING.to_string());
        }
        lines.push(format!("rows checked (excluding empty): {}", report.rows_validated));

        lines
    }

    fn push_row(&self, lines: &mut Vec<String>, row: &RowReport) {
        lines.push(format!("Row {}:", row.row_number));
        for (index, errors) in row.errors.iter() {
            lines.push(self.column_line(index, errors));
        }
    }

    fn column_line(&self, index: usize, errors: &ColumnErrors) -> String {
        format!(
            "\tColumn {:02}: {} | {} | {}",
            index + 1,
            self.rules.column_name(index).unwrap_or_default(),
            errors.value.display(),
            errors.messages().join(", ")
        )
    }
}

/// Joins report lines into file content.
pub fn render(lines: &[String]) -> String {
    let mut content = lines.join("\n");
    content.push('\n');
    content
}
