//! Header row verification against the rule table

use std::fmt;

use crate::schema::RuleTable;

/// A schema column whose header does not match the expected name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMismatch {
    /// 0-based column index
    pub index: usize,
    /// Name declared by the schema
    pub expected: String,
    /// Trimmed header found in the source, `None` past the end of the row
    pub found: Option<String>,
}

impl fmt::Display for HeaderMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column order or headers violated: column {:02} expected {:?}, found ",
            self.index + 1,
            self.expected
        )?;
        match &self.found {
            Some(found) => write!(f, "{:?}", found),
            None => write!(f, "nothing"),
        }
    }
}

/// Compares every schema column's header (trimmed) with its rule's name.
///
/// Mismatches are reported in column order; verification never stops early.
pub fn verify_headers(rules: &RuleTable, headers: &[String]) -> Vec<HeaderMismatch> {
    rules
        .iter()
        .filter_map(|rule| {
            let found = headers.get(rule.index).map(|h| h.trim());
            if found == Some(rule.name.as_str()) {
                return None;
            }
            Some(HeaderMismatch {
                index: rule.index,
                expected: rule.name.clone(),
                found: found.map(str::to_string),
            })
        })
        .collect()
}
