//! ObservationScope for begin/complete logging around a unit of work
//!
//! - `{NAME}_BEGIN` on creation
//! - `{NAME}_COMPLETE` or `{NAME}_FAILED` when closed explicitly
//! - `{NAME}_INCOMPLETE` on drop if never closed

use std::time::Instant;

use super::logger::{Logger, Severity};

/// Logs the lifecycle of one unit of work, with elapsed milliseconds.
///
/// ```ignore
/// let scope = ObservationScope::with_fields("VALIDATE", &[("dataset", "a.xlsx")]);
/// // ... work ...
/// scope.complete_with_fields(&[("rows", "12")]);
/// ```
pub struct ObservationScope {
    name: String,
    fields: Vec<(String, String)>,
    started: Instant,
    closed: bool,
}

impl ObservationScope {
    pub fn new(name: &str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Opens a scope whose fields are repeated on every closing line.
    pub fn with_fields(name: &str, fields: &[(&str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);
        Self {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            started: Instant::now(),
            closed: false,
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.close(Severity::Info, "COMPLETE", extra);
    }

    /// Logs `{NAME}_FAILED` at ERROR level.
    pub fn fail(mut self, reason: &str) {
        self.close(Severity::Error, "FAILED", &[("reason", reason)]);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    fn close(&mut self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        self.closed = true;
        let elapsed = self.elapsed_ms();
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        fields.extend_from_slice(extra);
        fields.push(("elapsed_ms", elapsed.as_str()));
        Logger::log(severity, &format!("{}_{}", self.name, suffix), &fields);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.closed {
            self.close(
                Severity::Warn,
                "INCOMPLETE",
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
