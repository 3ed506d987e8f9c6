//! # Batch Errors
//!
//! Report IO failures abort the run: a dataset whose report cannot be written
//! has no observable outcome.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for batch operations
pub type BatchResult<T> = Result<T, BatchError>;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot scan input directory {}: {source}", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BatchError {
    /// Get error code
    pub fn code(&self) -> &'static str {
        match self {
            BatchError::Discover { .. } => "SHEET_BATCH_DISCOVER_FAILED",
            BatchError::WriteReport { .. } => "SHEET_BATCH_REPORT_WRITE_FAILED",
        }
    }
}
