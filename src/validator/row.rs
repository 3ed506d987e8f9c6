//! Row validation and per-dataset aggregation
//!
//! State is kept per dataset, not per row:
//! - whether a row with an empty first column has been seen
//! - whether a data row followed such a row (sticky, reported once)
//! - how many data rows were validated
//!
//! A row with an empty first column is an end-of-data marker: it is skipped,
//! not counted, and its other columns are not validated.

use std::collections::BTreeMap;

use crate::schema::{AllowLists, RuleTable};
use crate::source::Dataset;

use super::check::{CheckResult, Violation};
use super::headers::{verify_headers, HeaderMismatch};
use super::rules::CellValidator;
use super::value::CellValue;

/// Failures of one column in one row
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnErrors {
    /// The cell as read from the source
    pub value: CellValue,
    /// Violations in check order, never empty
    pub violations: Vec<Violation>,
}

impl ColumnErrors {
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(Violation::message).collect()
    }
}

/// Column index → failures, in ascending column order.
///
/// Never holds an entry for a column that passed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowErrorReport {
    columns: BTreeMap<usize, ColumnErrors>,
}

impl RowErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a check result; passing results are dropped.
    pub fn record(&mut self, index: usize, value: &CellValue, result: CheckResult) {
        if result.passed() {
            return;
        }
        self.columns
            .entry(index)
            .or_insert_with(|| ColumnErrors {
                value: value.clone(),
                violations: Vec::new(),
            })
            .violations
            .extend(result.into_violations());
    }

    pub fn get(&self, index: usize) -> Option<&ColumnErrors> {
        self.columns.get(&index)
    }

    /// Failing columns in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ColumnErrors)> {
        self.columns.iter().map(|(index, errors)| (*index, errors))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of failing columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Total violations across columns
    pub fn violation_count(&self) -> usize {
        self.columns.values().map(|c| c.violations.len()).sum()
    }
}

/// Errors of one row, keyed by its 1-based physical row number
#[derive(Debug, Clone, PartialEq)]
pub struct RowReport {
    pub row_number: usize,
    pub errors: RowErrorReport,
}

/// Aggregated validation result of one dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetReport {
    /// Dataset name (source file name)
    pub dataset: String,
    /// Header cells that did not match the schema
    pub header_mismatches: Vec<HeaderMismatch>,
    /// Rows with at least one violation, in physical order
    pub rows: Vec<RowReport>,
    /// Non-skipped rows
    pub rows_validated: usize,
    /// An empty first-column row was followed by a data row
    pub empty_row_before_end: bool,
}

impl DatasetReport {
    pub fn rows_with_errors(&self) -> usize {
        self.rows.len()
    }

    pub fn violation_count(&self) -> usize {
        self.rows.iter().map(|r| r.errors.violation_count()).sum()
    }

    /// No violations, no header problems, no interleaved empty rows
    pub fn is_clean(&self) -> bool {
        self.rows.is_empty() && self.header_mismatches.is_empty() && !self.empty_row_before_end
    }
}

/// What happened to a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// First column empty; row not validated
    Skipped,
    /// All columns passed
    Clean,
    /// Number of failing columns
    Invalid(usize),
}

/// Validates the rows of one dataset in physical order.
pub struct DatasetValidator<'a> {
    rules: &'a RuleTable,
    cells: CellValidator<'a>,
    empty_row_seen: bool,
    report: DatasetReport,
}

impl<'a> DatasetValidator<'a> {
    /// Creates a fresh validator for one dataset.
    pub fn new(
        dataset: impl Into<String>,
        rules: &'a RuleTable,
        allow_lists: &'a AllowLists,
    ) -> Self {
        Self {
            rules,
            cells: CellValidator::new(allow_lists),
            empty_row_seen: false,
            report: DatasetReport {
                dataset: dataset.into(),
                ..DatasetReport::default()
            },
        }
    }

    /// Verifies the header row and records any mismatches.
    pub fn check_headers(&mut self, headers: &[String]) -> &[HeaderMismatch] {
        self.report.header_mismatches = verify_headers(self.rules, headers);
        &self.report.header_mismatches
    }

    /// Validates one row; `row_number` is its 1-based physical position.
    ///
    /// Cells missing from a short row are treated as empty.
    pub fn validate_row(&mut self, row_number: usize, row: &[CellValue]) -> RowOutcome {
        if row.first().map_or(true, CellValue::is_empty) {
            self.empty_row_seen = true;
            return RowOutcome::Skipped;
        }

        if self.empty_row_seen {
            self.report.empty_row_before_end = true;
        }

        let mut errors = RowErrorReport::new();
        for rule in self.rules.iter() {
            let value = row.get(rule.index).unwrap_or(&CellValue::Empty);
            errors.record(rule.index, value, self.cells.validate(value, rule));
        }

        self.report.rows_validated += 1;

        if errors.is_empty() {
            return RowOutcome::Clean;
        }

        let failing = errors.len();
        self.report.rows.push(RowReport { row_number, errors });
        RowOutcome::Invalid(failing)
    }

    /// Consumes the validator, yielding the final report.
    pub fn finish(self) -> DatasetReport {
        self.report
    }
}

/// Validates a whole dataset: headers first, then every data row.
pub fn validate_dataset(
    dataset: &Dataset,
    rules: &RuleTable,
    allow_lists: &AllowLists,
) -> DatasetReport {
    let mut validator = DatasetValidator::new(dataset.name(), rules, allow_lists);
    validator.check_headers(dataset.headers());

    for (data_index, row) in dataset.rows().iter().enumerate() {
        validator.validate_row(dataset.row_number(data_index), row);
    }

    validator.finish()
}
