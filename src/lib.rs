//! sheetcheck - A strict, deterministic validator for registry spreadsheets
//!
//! Every row of a workbook's designated sheet is checked against a per-column
//! rule table; each workbook gets a human-readable report beside it.

pub mod batch;
pub mod cli;
pub mod observability;
pub mod report;
pub mod schema;
pub mod source;
pub mod validator;
