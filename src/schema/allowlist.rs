//! Named allow-lists of permitted cell values

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Collection of named allow-lists.
///
/// Read-only once loaded. Allow-list files are a JSON object mapping each
/// list name to its permitted values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowLists {
    lists: HashMap<String, BTreeSet<String>>,
}

impl AllowLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a named list.
    pub fn insert<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    /// Checks if a list with this name exists.
    pub fn has_list(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    /// Membership test. Returns `None` when the list itself is unknown.
    pub fn contains(&self, name: &str, value: &str) -> Option<bool> {
        self.lists.get(name).map(|values| values.contains(value))
    }

    /// List names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.lists.keys()
    }

    /// Returns the number of lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
