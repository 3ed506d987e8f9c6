//! Validation engine
//!
//! Validates typed cells against column rules and aggregates the failures of
//! a whole dataset.
//!
//! # Design Principles
//!
//! - Every check returns its own result; results are merged, never thrown
//! - A row with five invalid columns yields five entries, not an abort
//! - Violations are ordered by column, then by check order
//! - Validation is deterministic and never mutates the data

mod check;
mod checksum;
mod headers;
mod row;
mod rules;
mod value;

pub use check::{CheckResult, Violation, ViolationKind};
pub use checksum::{check_national_id, reduce_checksum, MaskError, NationalId};
pub use headers::{verify_headers, HeaderMismatch};
pub use row::{
    validate_dataset, ColumnErrors, DatasetReport, DatasetValidator, RowErrorReport, RowOutcome,
    RowReport,
};
pub use rules::{check_date, check_digits, check_whitespace, is_cyrillic_text, CellValidator};
pub use value::{CellValue, DATE_FORMAT};
