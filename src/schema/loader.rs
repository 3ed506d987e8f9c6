//! Schema loader for reading the rule table from disk at startup
//!
//! - Schema file: one JSON document describing every column
//! - Allow-list file: JSON object of list name → permitted values
//! - Missing or malformed files cause startup failure (FATAL)

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::allowlist::AllowLists;
use super::errors::{SchemaError, SchemaResult};
use super::resolver::RuleTable;
use super::types::SheetSchema;

/// Reads the schema and allow-list files and builds the rule table.
pub struct SchemaLoader {
    /// Schema file
    schema_path: PathBuf,
    /// Allow-list file, if any
    allow_lists_path: Option<PathBuf>,
}

impl SchemaLoader {
    /// Creates a loader for the given files.
    pub fn new(schema_path: impl Into<PathBuf>, allow_lists_path: Option<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
            allow_lists_path,
        }
    }

    /// Returns the schema file path.
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Loads both files and builds the rule table.
    ///
    /// The allow-lists are returned alongside the table since value
    /// validation consults them directly.
    pub fn load(&self) -> SchemaResult<(RuleTable, AllowLists)> {
        let schema = self.load_schema()?;
        let allow_lists = self.load_allow_lists()?;
        let table = RuleTable::build(schema, &allow_lists)?;
        Ok((table, allow_lists))
    }

    /// Loads the schema file.
    pub fn load_schema(&self) -> SchemaResult<SheetSchema> {
        read_json(&self.schema_path)
    }

    /// Loads the allow-list file, or an empty collection if none is configured.
    pub fn load_allow_lists(&self) -> SchemaResult<AllowLists> {
        match &self.allow_lists_path {
            Some(path) => read_json(path),
            None => Ok(AllowLists::new()),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> SchemaResult<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        SchemaError::malformed(
            path.display().to_string(),
            format!("Failed to read file: {}", e),
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchemaError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
    })
}
