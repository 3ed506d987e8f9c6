//! Column rule definitions
//!
//! Supported value kinds:
//! - none: no type constraint (whitespace hygiene only)
//! - text: free text (whitespace hygiene only)
//! - alpha-text: Cyrillic letters, spaces and hyphens
//! - digit-text: decimal digits, optional integer bounds
//! - date: parsed date cell, optional calendar bounds
//! - checksum-id: masked national ID `XXX-XXX-XXX CC`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a column may be left blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emptiness {
    /// Empty cells are a violation
    #[default]
    Required,
    /// Empty cells pass without further checks
    Optional,
}

/// Value kind of a column.
///
/// Bounds live inside the kind they belong to, so numeric bounds can only be
/// attached to digit columns and date bounds only to date columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValueKind {
    /// No type constraint
    None,
    /// Free text
    Text,
    /// Cyrillic letters, space and hyphen
    AlphaText,
    /// Decimal digits only
    DigitText {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    /// Parsed date or date/time cell
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<NaiveDate>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<NaiveDate>,
    },
    /// Masked national ID with trailing checksum
    ChecksumId,
}

impl ValueKind {
    /// Digit column bounded on both sides
    pub fn digits(min: i64, max: i64) -> Self {
        ValueKind::DigitText {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Date column bounded on both sides
    pub fn dates(min: NaiveDate, max: NaiveDate) -> Self {
        ValueKind::Date {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Returns the kind name used in schema files
    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueKind::None => "none",
            ValueKind::Text => "text",
            ValueKind::AlphaText => "alpha-text",
            ValueKind::DigitText { .. } => "digit-text",
            ValueKind::Date { .. } => "date",
            ValueKind::ChecksumId => "checksum-id",
        }
    }

    /// Returns true when `min > max` for either bound pair
    pub fn has_inverted_bounds(&self) -> bool {
        match self {
            ValueKind::DigitText {
                min: Some(min),
                max: Some(max),
            } => min > max,
            ValueKind::Date {
                min: Some(min),
                max: Some(max),
            } => min > max,
            _ => false,
        }
    }
}

/// Validation policy of a single schema column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// 0-based column index
    pub index: usize,
    /// Expected header text
    pub name: String,
    /// Emptiness policy
    #[serde(default)]
    pub emptiness: Emptiness,
    /// Value kind with its bounds
    #[serde(flatten)]
    pub kind: ValueKind,
    /// Name of the allow-list the value must belong to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_list: Option<String>,
}

impl ColumnRule {
    /// Create a required column with no type constraint
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            emptiness: Emptiness::Required,
            kind: ValueKind::None,
            allow_list: None,
        }
    }

    /// Allow the column to be blank
    pub fn optional(mut self) -> Self {
        self.emptiness = Emptiness::Optional;
        self
    }

    /// Set the value kind
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Restrict values to a named allow-list
    pub fn with_allow_list(mut self, list: impl Into<String>) -> Self {
        self.allow_list = Some(list.into());
        self
    }

    pub fn is_optional(&self) -> bool {
        self.emptiness == Emptiness::Optional
    }
}

/// Schema file contents: the rule of every column of one template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSchema {
    /// Schema identifier
    pub schema_id: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Column rules, in any order
    pub columns: Vec<ColumnRule>,
}

impl SheetSchema {
    pub fn new(schema_id: impl Into<String>, columns: Vec<ColumnRule>) -> Self {
        Self {
            schema_id: schema_id.into(),
            description: None,
            columns,
        }
    }
}
