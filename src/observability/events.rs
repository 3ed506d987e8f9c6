//! Observable events of a validation run
//!
//! Events are explicit and typed; each carries its default severity.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Run lifecycle
    /// Command started
    RunStart,
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// Schema and allow-lists loaded, rule table built
    SchemaLoaded,
    /// All datasets processed
    RunComplete,
    /// Run aborted by a configuration error (FATAL)
    RunFailed,

    // Datasets
    /// Dataset validated
    DatasetComplete,
    /// Dataset could not be read
    DatasetSkipped,
    /// Header cell does not match the schema
    HeaderMismatch,
    /// Row recorded with violations
    RowInvalid,
    /// Report file written
    ReportWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunStart => "RUN_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::RunComplete => "RUN_COMPLETE",
            Event::RunFailed => "RUN_FAILED",
            Event::DatasetComplete => "DATASET_COMPLETE",
            Event::DatasetSkipped => "DATASET_SKIPPED",
            Event::HeaderMismatch => "HEADER_MISMATCH",
            Event::RowInvalid => "ROW_INVALID",
            Event::ReportWritten => "REPORT_WRITTEN",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Event::RowInvalid => Severity::Trace,
            Event::DatasetSkipped | Event::HeaderMismatch => Severity::Warn,
            Event::RunFailed => Severity::Fatal,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        let events = [
            Event::RunStart,
            Event::ConfigLoaded,
            Event::SchemaLoaded,
            Event::RunComplete,
            Event::RunFailed,
            Event::DatasetComplete,
            Event::DatasetSkipped,
            Event::HeaderMismatch,
            Event::RowInvalid,
            Event::ReportWritten,
        ];
        for event in events {
            assert!(event
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
            assert_eq!(event.to_string(), event.as_str());
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::RunFailed.severity(), Severity::Fatal);
        assert_eq!(Event::DatasetSkipped.severity(), Severity::Warn);
        assert_eq!(Event::RowInvalid.severity(), Severity::Trace);
        assert_eq!(Event::DatasetComplete.severity(), Severity::Info);
    }
}
