//! CLI argument definitions using clap
//!
//! Commands:
//! - sheetcheck validate --config <path> [FILE]
//! - sheetcheck schema --config <path>
//! - sheetcheck check-id <VALUE>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::Severity;

/// sheetcheck - A strict, deterministic validator for registry spreadsheets
#[derive(Parser, Debug)]
#[command(name = "sheetcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also log every invalid row
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one workbook, or every workbook of the input directory
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./sheetcheck.json")]
        config: PathBuf,

        /// Single workbook to validate instead of the input directory
        file: Option<PathBuf>,
    },

    /// Load the schema and allow-lists and print the column rules
    Schema {
        /// Path to configuration file
        #[arg(long, default_value = "./sheetcheck.json")]
        config: PathBuf,
    },

    /// Check a masked national ID (XXX-XXX-XXX CC)
    CheckId {
        /// The masked identifier
        value: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Lowest severity written to the log
    pub fn min_severity(&self) -> Severity {
        if self.verbose {
            Severity::Trace
        } else if self.quiet {
            Severity::Warn
        } else {
            Severity::Info
        }
    }
}
