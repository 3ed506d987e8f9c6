//! # Tabular Sources
//!
//! Supplies header names and typed rows to the validation engine. The engine
//! never parses file bytes itself.

pub mod dataset;
pub mod errors;
pub mod xlsx;

pub use dataset::Dataset;
pub use errors::{SourceError, SourceResult};
pub use xlsx::{dataset_from_range, read_workbook};
