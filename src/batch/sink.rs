//! Report sinks
//!
//! A sink receives the finished report lines of one dataset. The file sink
//! writes `<stem>.<extension>` beside the workbook, replacing any previous
//! report; the memory sink keeps reports for tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::report::render;

use super::errors::{BatchError, BatchResult};

/// Destination of dataset reports.
pub trait ReportSink {
    /// Where the report of the workbook at `source` goes.
    fn report_path(&self, source: &Path) -> PathBuf;

    /// Stores the report of the workbook at `source`; returns where it went.
    fn write_report(&self, source: &Path, lines: &[String]) -> BatchResult<PathBuf>;
}

/// Report path beside the workbook: same stem, report extension.
pub fn report_path(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

/// Writes each report to a file next to its workbook.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    extension: String,
}

impl FileReportSink {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl ReportSink for FileReportSink {
    fn report_path(&self, source: &Path) -> PathBuf {
        report_path(source, &self.extension)
    }

    fn write_report(&self, source: &Path, lines: &[String]) -> BatchResult<PathBuf> {
        let path = self.report_path(source);
        // fs::write truncates
        fs::write(&path, render(lines)).map_err(|source| BatchError::WriteReport {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// In-memory sink for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryReportSink {
    reports: Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports in write order
    pub fn reports(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Lines of the last report written for `source`
    pub fn lines_for(&self, source: &Path) -> Option<Vec<String>> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(path, _)| path == source)
            .map(|(_, lines)| lines.clone())
    }

    pub fn len(&self) -> usize {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportSink for MemoryReportSink {
    fn report_path(&self, source: &Path) -> PathBuf {
        source.to_path_buf()
    }

    fn write_report(&self, source: &Path, lines: &[String]) -> BatchResult<PathBuf> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((source.to_path_buf(), lines.to_vec()));
        Ok(source.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_path() {
        assert_eq!(
            report_path(Path::new("/data/book.xlsx"), "log"),
            PathBuf::from("/data/book.log")
        );
    }

    #[test]
    fn test_report_path_keeps_stem_case() {
        let sink = FileReportSink::new("log");
        assert_eq!(sink.report_path(Path::new("a.XLSX")), PathBuf::from("a.log"));
        assert_eq!(sink.report_path(Path::new("A.xlsx")), PathBuf::from("A.log"));
    }

    #[test]
    fn test_file_sink_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("book.xlsx");
        let sink = FileReportSink::new("log");

        sink.write_report(&source, &["first".into(), "second".into()])
            .unwrap();
        let path = sink.write_report(&source, &["third".into()]).unwrap();

        assert_eq!(path, temp_dir.path().join("book.log"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "third\n");
    }

    #[test]
    fn test_file_sink_unwritable() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("missing").join("book.xlsx");
        let err = FileReportSink::new("log")
            .write_report(&source, &[])
            .unwrap_err();
        assert_eq!(err.code(), "SHEET_BATCH_REPORT_WRITE_FAILED");
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemoryReportSink::new();
        assert!(sink.is_empty());

        let source = Path::new("a.xlsx");
        sink.write_report(source, &["x".into()]).unwrap();
        sink.write_report(source, &["y".into()]).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines_for(source), Some(vec!["y".to_string()]));
        assert_eq!(
            sink.reports(),
            vec![
                (source.to_path_buf(), vec!["x".to_string()]),
                (source.to_path_buf(), vec!["y".to_string()]),
            ]
        );
        assert_eq!(sink.lines_for(Path::new("b.xlsx")), None);
    }
}
