//! Rule table: column index → column rule
//!
//! Built once per schema and consulted for every cell. The table checks its
//! own invariants on construction:
//! - column indices are unique
//! - allow-list references resolve against the loaded lists
//! - bounds are not inverted

use std::collections::BTreeMap;

use super::allowlist::AllowLists;
use super::errors::{SchemaError, SchemaResult};
use super::types::{ColumnRule, SheetSchema};

/// Immutable lookup table of column rules, ordered by column index.
#[derive(Debug, Clone)]
pub struct RuleTable {
    schema_id: String,
    rules: BTreeMap<usize, ColumnRule>,
}

impl RuleTable {
    /// Builds the table, validating it against the available allow-lists.
    ///
    /// # Errors
    ///
    /// - SHEET_SCHEMA_EMPTY if the schema has no columns
    /// - SHEET_SCHEMA_DUPLICATE_COLUMN if an index is declared twice
    /// - SHEET_SCHEMA_UNKNOWN_ALLOW_LIST if a reference does not resolve
    /// - SHEET_SCHEMA_INVALID_BOUNDS if a minimum exceeds its maximum
    pub fn build(schema: SheetSchema, allow_lists: &AllowLists) -> SchemaResult<Self> {
        if schema.columns.is_empty() {
            return Err(SchemaError::empty(&schema.schema_id));
        }

        let mut rules = BTreeMap::new();

        for rule in schema.columns {
            if let Some(list) = &rule.allow_list {
                if !allow_lists.has_list(list) {
                    return Err(SchemaError::unknown_allow_list(rule.index, list));
                }
            }

            if rule.kind.has_inverted_bounds() {
                return Err(SchemaError::invalid_bounds(rule.index));
            }

            let index = rule.index;
            if rules.insert(index, rule).is_some() {
                return Err(SchemaError::duplicate_column(index));
            }
        }

        Ok(Self {
            schema_id: schema.schema_id,
            rules,
        })
    }

    /// Returns the schema identifier
    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// Looks up the rule of a column.
    pub fn rule(&self, index: usize) -> Option<&ColumnRule> {
        self.rules.get(&index)
    }

    /// Returns the display name of a column.
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.rules.get(&index).map(|rule| rule.name.as_str())
    }

    /// Iterates rules in ascending column order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnRule> {
        self.rules.values()
    }

    /// Returns the number of columns in the schema.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
