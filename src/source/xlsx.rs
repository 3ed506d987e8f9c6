//! Workbook reader
//!
//! Reads the designated sheet of an `.xlsx` workbook into a `Dataset`.
//! Cell positions are absolute: leading blank rows and columns of the used
//! range are preserved, so column 0 is always the sheet's first column.

use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx, XlsxError};
use chrono::{NaiveDate, NaiveTime};

use crate::validator::CellValue;

use super::dataset::Dataset;
use super::errors::{SourceError, SourceResult};

/// Opens a workbook and reads one sheet.
///
/// # Errors
///
/// - `OpenFailed` if the file is not a readable workbook
/// - `SheetMissing` if the workbook has no sheet with this name
/// - `SheetUnreadable` if the sheet exists but cannot be parsed
pub fn read_workbook(path: &Path, sheet: &str, header_rows: usize) -> SourceResult<Dataset> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: XlsxError| SourceError::OpenFailed {
            file: file.clone(),
            reason: e.to_string(),
        })?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(SourceError::SheetMissing {
            sheet: sheet.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| SourceError::SheetUnreadable {
            sheet: sheet.to_string(),
            reason: e.to_string(),
        })?;

    Ok(dataset_from_range(file, &range, header_rows))
}

/// Converts a cell range into a dataset.
///
/// The last of the `header_rows` rows supplies the headers; data starts right
/// after it.
pub fn dataset_from_range(
    name: impl Into<String>,
    range: &Range<Data>,
    header_rows: usize,
) -> Dataset {
    let Some((last_row, last_col)) = range.end() else {
        return Dataset::with_header_rows(name, header_rows, Vec::new(), Vec::new());
    };

    let read_row = |row: u32| -> Vec<CellValue> {
        (0..=last_col)
            .map(|col| range.get_value((row, col)).map_or(CellValue::Empty, cell_value))
            .collect()
    };

    let first_data_row = u32::try_from(header_rows).unwrap_or(u32::MAX);

    let headers = first_data_row
        .checked_sub(1)
        .filter(|row| *row <= last_row)
        .map(|row| {
            read_row(row)
                .iter()
                .map(|cell| cell.as_text().map(|t| t.into_owned()).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let rows = (first_data_row..=last_row).map(read_row).collect();

    Dataset::with_header_rows(name, header_rows, headers, rows)
}

/// Maps a spreadsheet cell to a typed value.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map_or_else(|| CellValue::Text(cell.to_string()), CellValue::Date),
        Data::DateTimeIso(s) => cell
            .as_datetime()
            .or_else(|| NaiveDate::from_str(s).ok().map(|d| d.and_time(NaiveTime::MIN)))
            .map_or_else(|| CellValue::Text(s.clone()), CellValue::Date),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Text(cell.to_string()),
    }
}
