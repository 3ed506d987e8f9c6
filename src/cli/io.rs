//! JSON output for CLI
//!
//! - One JSON object per command on stdout
//! - `{"status":"ok","data":...}` or `{"status":"error","code":...,"message":...}`

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&ok_response(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_value(&error_response(code, message))
}

fn ok_response(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

fn error_response(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

fn write_value(response: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
