//! In-memory tabular dataset

use crate::validator::CellValue;

/// One sheet's header row and data rows.
///
/// `header_rows` is the number of physical rows above the first data row;
/// the last of them holds the column headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    header_rows: usize,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Creates a dataset with a single header row.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self::with_header_rows(name, 1, headers, rows)
    }

    pub fn with_header_rows(
        name: impl Into<String>,
        header_rows: usize,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        Self {
            name: name.into(),
            header_rows,
            headers,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 1-based physical row number of a data row
    pub fn row_number(&self, data_index: usize) -> usize {
        data_index + self.header_rows + 1
    }
}
