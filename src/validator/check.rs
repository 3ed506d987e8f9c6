//! Check results and violation descriptions
//!
//! Every value check returns its own `CheckResult`; results are merged, never
//! mutated after the fact.

use std::fmt;

use chrono::NaiveDate;

use super::value::DATE_FORMAT;

/// Category of a recorded violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Required value missing
    Empty,
    /// Leading/trailing space or line break
    Whitespace,
    /// Value fails structural parsing
    Format,
    /// Numeric or date bound violated
    Range,
    /// Value not in its allow-list
    Membership,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::Empty => "EMPTY",
            ViolationKind::Whitespace => "WHITESPACE",
            ViolationKind::Format => "FORMAT",
            ViolationKind::Range => "RANGE",
            ViolationKind::Membership => "MEMBERSHIP",
        }
    }
}

/// A single rule violation for one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    kind: ViolationKind,
    message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn empty_value() -> Self {
        Self::new(ViolationKind::Empty, "empty value")
    }

    pub fn leading_space() -> Self {
        Self::new(ViolationKind::Whitespace, "contains a leading space")
    }

    pub fn trailing_space() -> Self {
        Self::new(ViolationKind::Whitespace, "contains a trailing space")
    }

    pub fn line_break() -> Self {
        Self::new(ViolationKind::Whitespace, "contains a line break")
    }

    pub fn not_cyrillic() -> Self {
        Self::new(
            ViolationKind::Format,
            "contains characters other than Cyrillic, hyphen, or space",
        )
    }

    pub fn not_a_number() -> Self {
        Self::new(ViolationKind::Format, "value is not a number")
    }

    pub fn below_minimum(min: i64) -> Self {
        Self::new(ViolationKind::Range, format!("less than minimum {}", min))
    }

    pub fn above_maximum(max: i64) -> Self {
        Self::new(ViolationKind::Range, format!("greater than maximum {}", max))
    }

    pub fn invalid_date() -> Self {
        Self::new(ViolationKind::Format, "invalid date format")
    }

    pub fn earlier_than(min: NaiveDate) -> Self {
        Self::new(
            ViolationKind::Range,
            format!("earlier than minimum {}", min.format(DATE_FORMAT)),
        )
    }

    pub fn later_than(max: NaiveDate) -> Self {
        Self::new(
            ViolationKind::Range,
            format!("later than maximum {}", max.format(DATE_FORMAT)),
        )
    }

    pub fn invalid_id_format() -> Self {
        Self::new(ViolationKind::Format, "invalid format (XXX-XXX-XXX CC)")
    }

    pub fn checksum_mismatch(computed: u32, expected: &str) -> Self {
        Self::new(
            ViolationKind::Format,
            format!("checksum error ({} != {})", computed, expected),
        )
    }

    pub fn not_allowed() -> Self {
        Self::new(ViolationKind::Membership, "not in allowed set")
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Outcome of validating one value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    violations: Vec<Violation>,
}

impl CheckResult {
    /// A passing result
    pub fn pass() -> Self {
        Self::default()
    }

    /// A result with a single violation
    pub fn fail(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Appends the violations of `other`, keeping order.
    pub fn merge(mut self, other: CheckResult) -> Self {
        self.violations.extend(other.violations);
        self
    }

    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Violation descriptions in check order
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(Violation::message).collect()
    }
}
