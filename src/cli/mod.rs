//! CLI module for sheetcheck
//!
//! Provides command-line interface for:
//! - validate: Validate workbooks and write one report per workbook
//! - schema: Print the resolved column rules
//! - check-id: Check a single masked national ID

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_id, run, run_command, schema, validate, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
