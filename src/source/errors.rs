//! # Source Errors
//!
//! A source error is fatal for its dataset only; the batch carries on.

use thiserror::Error;

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Dataset acquisition errors
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("could not open file: {file}: {reason}")]
    OpenFailed { file: String, reason: String },

    #[error("could not find sheet: {sheet}")]
    SheetMissing { sheet: String },

    #[error("could not open sheet: {sheet}: {reason}")]
    SheetUnreadable { sheet: String, reason: String },
}

impl SourceError {
    /// Get error code
    pub fn code(&self) -> &'static str {
        match self {
            SourceError::OpenFailed { .. } => "SHEET_SOURCE_OPEN_FAILED",
            SourceError::SheetMissing { .. } => "SHEET_SOURCE_SHEET_MISSING",
            SourceError::SheetUnreadable { .. } => "SHEET_SOURCE_SHEET_UNREADABLE",
        }
    }

    /// Lines written to the dataset report in place of validation results
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            SourceError::OpenFailed { file, reason } => {
                vec![format!("could not open file: {}", file), reason.clone()]
            }
            SourceError::SheetMissing { sheet } => {
                vec![format!("could not find sheet: {}", sheet)]
            }
            SourceError::SheetUnreadable { sheet, reason } => {
                vec![format!("could not open sheet: {}", sheet), reason.clone()]
            }
        }
    }
}
