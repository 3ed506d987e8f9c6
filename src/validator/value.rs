//! Typed cell values supplied by a tabular source

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime};

/// Date rendering used in messages and reports
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// A single cell as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell, or a cell past the end of a short row
    Empty,
    /// String cell
    Text(String),
    /// Numeric cell
    Number(f64),
    /// Date or date/time cell
    Date(NaiveDateTime),
}

impl CellValue {
    /// A value is empty iff it is absent or an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the raw string of a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the parsed date/time of a date cell.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Textual form used by character, digit, checksum and allow-list checks.
    ///
    /// Integral numbers render without a fractional part, dates as
    /// `dd.mm.yyyy`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            CellValue::Date(dt) => Some(Cow::Owned(dt.format(DATE_FORMAT).to_string())),
        }
    }

    /// Report rendering: dates as `dd.mm.yyyy`, text as a quoted literal.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => "<empty>".to_string(),
            CellValue::Text(s) => format!("{:?}", s),
            CellValue::Number(n) => format_number(*n),
            CellValue::Date(dt) => dt.format(DATE_FORMAT).to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    // Spreadsheets store every number as a float; whole values are integers.
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Date(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}
