//! # Dataset Reports
//!
//! Pure formatting of a dataset outcome into the line-oriented report written
//! beside each workbook.
//!
//! # Layout
//!
//! 1. One line per header mismatch
//! 2. `Row N:` followed by one tab-indented line per failing column
//! 3. A blank separator
//! 4. The empty-row warning, at most once
//! 5. `rows checked (excluding empty): N`
//!
//! A dataset that could not be read gets only the lines of its cause.

mod builder;

pub use builder::{render, DatasetOutcome, ReportBuilder, EMPTY_ROWS_WARNING};
