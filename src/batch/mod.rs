//! # Batch Validation
//!
//! Drives a validation run over a directory of workbooks.
//!
//! # Design Principles
//!
//! - Datasets are independent: each gets fresh validator state and its own report
//! - A workbook that cannot be read is reported and skipped, never fatal
//! - Workbooks are processed in file-name order
//! - Failing to write a report aborts the run

mod discover;
mod errors;
mod runner;
mod sink;

pub use discover::{discover_workbooks, WORKBOOK_EXTENSION};
pub use errors::{BatchError, BatchResult};
pub use runner::{BatchRunner, DatasetStatus, DatasetSummary, SourceSettings};
pub use sink::{report_path, FileReportSink, MemoryReportSink, ReportSink};
