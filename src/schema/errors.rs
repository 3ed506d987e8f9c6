//! Schema error types
//!
//! Error codes:
//! - SHEET_SCHEMA_MALFORMED (schema or allow-list file unreadable)
//! - SHEET_SCHEMA_EMPTY (no columns declared)
//! - SHEET_SCHEMA_DUPLICATE_COLUMN (two rules for one index)
//! - SHEET_SCHEMA_UNKNOWN_ALLOW_LIST (rule references a missing list)
//! - SHEET_SCHEMA_INVALID_BOUNDS (min greater than max)
//!
//! Every schema error is fatal for the run: no dataset is validated against
//! a rule table that failed to build.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema or allow-list file could not be read or parsed
    SheetSchemaMalformed,
    /// Schema declares no columns
    SheetSchemaEmpty,
    /// Column index declared twice
    SheetSchemaDuplicateColumn,
    /// Allow-list reference does not resolve
    SheetSchemaUnknownAllowList,
    /// Lower bound above upper bound
    SheetSchemaInvalidBounds,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::SheetSchemaMalformed => "SHEET_SCHEMA_MALFORMED",
            SchemaErrorCode::SheetSchemaEmpty => "SHEET_SCHEMA_EMPTY",
            SchemaErrorCode::SheetSchemaDuplicateColumn => "SHEET_SCHEMA_DUPLICATE_COLUMN",
            SchemaErrorCode::SheetSchemaUnknownAllowList => "SHEET_SCHEMA_UNKNOWN_ALLOW_LIST",
            SchemaErrorCode::SheetSchemaInvalidBounds => "SHEET_SCHEMA_INVALID_BOUNDS",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Offending column index if applicable
    column: Option<usize>,
}

impl SchemaError {
    /// Create an error for a malformed schema or allow-list file
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SheetSchemaMalformed,
            message: format!("Malformed file '{}': {}", path.into(), reason.into()),
            column: None,
        }
    }

    /// Create an error for a schema without columns
    pub fn empty(schema_id: &str) -> Self {
        Self {
            code: SchemaErrorCode::SheetSchemaEmpty,
            message: format!("Schema '{}' declares no columns", schema_id),
            column: None,
        }
    }

    /// Create a duplicate column error
    pub fn duplicate_column(index: usize) -> Self {
        Self {
            code: SchemaErrorCode::SheetSchemaDuplicateColumn,
            message: format!("Column {} is declared more than once", index),
            column: Some(index),
        }
    }

    /// Create an unknown allow-list error
    pub fn unknown_allow_list(index: usize, list: &str) -> Self {
        Self {
            code: SchemaErrorCode::SheetSchemaUnknownAllowList,
            message: format!("Column {} references unknown allow-list '{}'", index, list),
            column: Some(index),
        }
    }

    /// Create an inverted bounds error
    pub fn invalid_bounds(index: usize) -> Self {
        Self {
            code: SchemaErrorCode::SheetSchemaInvalidBounds,
            message: format!("Column {} has a minimum greater than its maximum", index),
            column: Some(index),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending column if applicable
    pub fn column(&self) -> Option<usize> {
        self.column
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
