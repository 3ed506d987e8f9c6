//! Batch runner: one workbook at a time, one report per workbook.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::report::{DatasetOutcome, ReportBuilder};
use crate::schema::{AllowLists, RuleTable};
use crate::source::{read_workbook, Dataset};
use crate::validator::{validate_dataset, DatasetReport};

use super::discover::discover_workbooks;
use super::errors::BatchResult;
use super::sink::ReportSink;

/// How workbooks are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// Designated sheet
    pub sheet_name: String,
    /// Physical rows above the first data row
    pub header_rows: usize,
}

/// Whether a dataset was validated or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetStatus {
    Clean,
    Invalid,
    Skipped,
}

/// Machine-readable outcome of one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub dataset: String,
    pub status: DatasetStatus,
    pub rows_checked: usize,
    pub rows_with_errors: usize,
    pub violations: usize,
    pub header_mismatches: usize,
    pub empty_rows_between_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatasetSummary {
    fn from_outcome(outcome: &DatasetOutcome) -> Self {
        match outcome {
            DatasetOutcome::Validated(report) => Self::validated(report),
            DatasetOutcome::Skipped { dataset, cause } => {
                Self::skipped(dataset.clone(), cause.to_string())
            }
        }
    }

    fn skipped(dataset: String, error: String) -> Self {
        Self {
            dataset,
            status: DatasetStatus::Skipped,
            rows_checked: 0,
            rows_with_errors: 0,
            violations: 0,
            header_mismatches: 0,
            empty_rows_between_data: false,
            report: None,
            error: Some(error),
        }
    }

    fn validated(report: &DatasetReport) -> Self {
        Self {
            dataset: report.dataset.clone(),
            status: if report.is_clean() {
                DatasetStatus::Clean
            } else {
                DatasetStatus::Invalid
            },
            rows_checked: report.rows_validated,
            rows_with_errors: report.rows_with_errors(),
            violations: report.violation_count(),
            header_mismatches: report.header_mismatches.len(),
            empty_rows_between_data: report.empty_row_before_end,
            report: None,
            error: None,
        }
    }
}

/// Validates workbooks against one rule table and hands each report to a
/// sink. Every dataset starts from fresh validation state.
pub struct BatchRunner<'a, S: ReportSink> {
    rules: &'a RuleTable,
    allow_lists: &'a AllowLists,
    settings: SourceSettings,
    sink: S,
}

impl<'a, S: ReportSink> BatchRunner<'a, S> {
    pub fn new(
        rules: &'a RuleTable,
        allow_lists: &'a AllowLists,
        settings: SourceSettings,
        sink: S,
    ) -> Self {
        Self {
            rules,
            allow_lists,
            settings,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Processes every workbook of `dir` in name order.
    ///
    /// A workbook that cannot be read is reported and skipped; the others
    /// still run. A workbook whose report would overwrite the report of an
    /// earlier workbook (`a.xlsx` and `a.XLSX`) is skipped without a report.
    pub fn run_dir(&self, dir: &Path) -> BatchResult<Vec<DatasetSummary>> {
        let mut claimed: BTreeMap<PathBuf, String> = BTreeMap::new();
        let mut summaries = Vec::new();

        for path in discover_workbooks(dir)? {
            let name = file_label(&path);
            let summary = match claimed.entry(self.sink.report_path(&path)) {
                Entry::Occupied(owner) => report_collision(name, owner.key(), owner.get()),
                Entry::Vacant(slot) => {
                    slot.insert(name);
                    self.run_file(&path)?
                }
            };
            summaries.push(summary);
        }

        Ok(summaries)
    }

    /// Reads, validates and reports one workbook.
    pub fn run_file(&self, path: &Path) -> BatchResult<DatasetSummary> {
        let name = file_label(path);
        let scope = ObservationScope::with_fields("DATASET", &[("dataset", name.as_str())]);

        let read = read_workbook(path, &self.settings.sheet_name, self.settings.header_rows);
        let outcome = match read {
            Ok(dataset) => DatasetOutcome::Validated(self.validate(&dataset)),
            Err(cause) => {
                let reason = cause.to_string();
                log_event_with_fields(
                    Event::DatasetSkipped,
                    &[
                        ("dataset", name.as_str()),
                        ("code", cause.code()),
                        ("reason", reason.as_str()),
                    ],
                );
                DatasetOutcome::Skipped {
                    dataset: name.clone(),
                    cause,
                }
            }
        };

        let summary = match self.write(path, &outcome) {
            Ok(summary) => summary,
            Err(e) => {
                scope.fail(&e.to_string());
                return Err(e);
            }
        };

        let rows = summary.rows_checked.to_string();
        let violations = summary.violations.to_string();
        scope.complete_with_fields(&[
            ("rows_checked", rows.as_str()),
            ("violations", violations.as_str()),
        ]);

        Ok(summary)
    }

    /// Validates an already loaded dataset and writes its report.
    ///
    /// `path` only locates the report.
    pub fn run_dataset(&self, path: &Path, dataset: &Dataset) -> BatchResult<DatasetSummary> {
        let outcome = DatasetOutcome::Validated(self.validate(dataset));
        self.write(path, &outcome)
    }

    fn validate(&self, dataset: &Dataset) -> DatasetReport {
        let report = validate_dataset(dataset, self.rules, self.allow_lists);

        for mismatch in &report.header_mismatches {
            let column = format!("{:02}", mismatch.index + 1);
            log_event_with_fields(
                Event::HeaderMismatch,
                &[
                    ("dataset", dataset.name()),
                    ("column", column.as_str()),
                    ("expected", mismatch.expected.as_str()),
                    ("found", mismatch.found.as_deref().unwrap_or("")),
                ],
            );
        }
        for row in &report.rows {
            let row_number = row.row_number.to_string();
            let columns = row.errors.len().to_string();
            log_event_with_fields(
                Event::RowInvalid,
                &[
                    ("dataset", dataset.name()),
                    ("row", row_number.as_str()),
                    ("columns", columns.as_str()),
                ],
            );
        }

        let rows = report.rows_validated.to_string();
        let invalid = report.rows_with_errors().to_string();
        log_event_with_fields(
            Event::DatasetComplete,
            &[
                ("dataset", dataset.name()),
                ("rows_checked", rows.as_str()),
                ("rows_with_errors", invalid.as_str()),
            ],
        );

        report
    }

    fn write(&self, path: &Path, outcome: &DatasetOutcome) -> BatchResult<DatasetSummary> {
        let lines = ReportBuilder::new(self.rules).build(outcome);
        let report_path = self.sink.write_report(path, &lines)?;

        let shown = report_path.display().to_string();
        log_event_with_fields(
            Event::ReportWritten,
            &[("dataset", outcome.dataset()), ("path", shown.as_str())],
        );

        let mut summary = DatasetSummary::from_outcome(outcome);
        summary.report = Some(report_path);
        Ok(summary)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Summary of a workbook skipped because `report` already belongs to `owner`.
fn report_collision(dataset: String, report: &Path, owner: &str) -> DatasetSummary {
    let reason = format!("report {} already belongs to {}", file_label(report), owner);

    log_event_with_fields(
        Event::DatasetSkipped,
        &[
            ("dataset", dataset.as_str()),
            ("code", "SHEET_BATCH_REPORT_COLLISION"),
            ("reason", reason.as_str()),
        ],
    );

    DatasetSummary::skipped(dataset, reason)
}
