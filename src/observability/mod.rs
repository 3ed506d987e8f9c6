//! Observability subsystem
//!
//! Structured JSON logging of run and dataset lifecycle events.
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes a validation outcome
//! 2. No async or background threads
//! 3. Deterministic output
//! 4. Logs go to stderr; stdout carries command responses
//!
//! # Usage
//!
//! ```ignore
//! use sheetcheck::observability::{log_event_with_fields, Event, ObservationScope};
//!
//! log_event_with_fields(Event::ReportWritten, &[("path", "a.log")]);
//!
//! let scope = ObservationScope::new("VALIDATE");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
