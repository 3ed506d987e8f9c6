//! Value-level checks and their composition
//!
//! Check order for one cell:
//! 1. Emptiness (required → "empty value" and stop; optional → pass and stop)
//! 2. Whitespace hygiene on text cells (all three checks run)
//! 3. Kind-specific check, skipped if hygiene failed
//! 4. Allow-list membership
//!
//! All failures are collected; no check aborts the others except emptiness.

use chrono::NaiveDate;

use crate::schema::{AllowLists, ColumnRule, ValueKind};

use super::check::{CheckResult, Violation};
use super::checksum::check_national_id;
use super::value::CellValue;

/// Validates cell values against column rules.
///
/// Stateless apart from the borrowed allow-lists.
pub struct CellValidator<'a> {
    allow_lists: &'a AllowLists,
}

impl<'a> CellValidator<'a> {
    pub fn new(allow_lists: &'a AllowLists) -> Self {
        Self { allow_lists }
    }

    /// Validates one value against its column rule.
    pub fn validate(&self, value: &CellValue, rule: &ColumnRule) -> CheckResult {
        if value.is_empty() {
            return if rule.is_optional() {
                CheckResult::pass()
            } else {
                CheckResult::fail(Violation::empty_value())
            };
        }

        let hygiene = match value.as_str() {
            Some(text) => check_whitespace(text),
            None => CheckResult::pass(),
        };

        let kind = if hygiene.passed() {
            check_kind(value, &rule.kind)
        } else {
            CheckResult::pass()
        };

        let membership = match &rule.allow_list {
            Some(list) => self.check_allow_list(value, list),
            None => CheckResult::pass(),
        };

        hygiene.merge(kind).merge(membership)
    }

    fn check_allow_list(&self, value: &CellValue, list: &str) -> CheckResult {
        let text = value.as_text().unwrap_or_default();
        match self.allow_lists.contains(list, &text) {
            Some(true) => CheckResult::pass(),
            _ => CheckResult::fail(Violation::not_allowed()),
        }
    }
}

/// Leading space, trailing space and line break checks, all independent.
pub fn check_whitespace(text: &str) -> CheckResult {
    let mut violations = Vec::new();

    if text.starts_with(' ') {
        violations.push(Violation::leading_space());
    }
    if text.ends_with(' ') {
        violations.push(Violation::trailing_space());
    }
    if text.contains('\n') {
        violations.push(Violation::line_break());
    }

    CheckResult::from_violations(violations)
}

fn check_kind(value: &CellValue, kind: &ValueKind) -> CheckResult {
    match kind {
        ValueKind::None | ValueKind::Text => CheckResult::pass(),
        ValueKind::AlphaText => {
            let text = value.as_text().unwrap_or_default();
            if is_cyrillic_text(&text) {
                CheckResult::pass()
            } else {
                CheckResult::fail(Violation::not_cyrillic())
            }
        }
        ValueKind::DigitText { min, max } => {
            check_digits(&value.as_text().unwrap_or_default(), *min, *max)
        }
        ValueKind::Date { min, max } => check_date(value, *min, *max),
        ValueKind::ChecksumId => check_national_id(&value.as_text().unwrap_or_default()),
    }
}

/// True if every character is one of the 33 Cyrillic letters (either case),
/// a space, or a hyphen.
pub fn is_cyrillic_text(text: &str) -> bool {
    text.chars()
        .flat_map(char::to_lowercase)
        .all(|c| matches!(c, 'а'..='я' | 'ё' | ' ' | '-'))
}

/// Digits-only check followed by independent bound checks.
pub fn check_digits(text: &str, min: Option<i64>, max: Option<i64>) -> CheckResult {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return CheckResult::fail(Violation::not_a_number());
    }

    // A digit string too long for i64 is above any representable maximum.
    let number = text.parse::<i64>().ok();
    let mut violations = Vec::new();

    if let (Some(min), Some(n)) = (min, number) {
        if n < min {
            violations.push(Violation::below_minimum(min));
        }
    }
    if let Some(max) = max {
        if number.map_or(true, |n| n > max) {
            violations.push(Violation::above_maximum(max));
        }
    }

    CheckResult::from_violations(violations)
}

/// Date-cell check; bounds compare the calendar date only.
pub fn check_date(
    value: &CellValue,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
) -> CheckResult {
    let date = match value.as_datetime() {
        Some(dt) => dt.date(),
        None => return CheckResult::fail(Violation::invalid_date()),
    };

    let mut violations = Vec::new();

    if let Some(min) = min {
        if date < min {
            violations.push(Violation::earlier_than(min));
        }
    }
    if let Some(max) = max {
        if date > max {
            violations.push(Violation::later_than(max));
        }
    }

    CheckResult::from_violations(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 30, 0).unwrap()
    }

    fn lists() -> AllowLists {
        let mut lists = AllowLists::new();
        lists.insert("Пол", ["Мужской", "Женский"]);
        lists.insert("Код", ["12", "15"]);
        lists
    }

    #[test]
    fn test_required_empty_has_single_violation() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(0, "Пол")
            .with_kind(ValueKind::digits(1, 5))
            .with_allow_list("Пол");

        for value in [CellValue::Empty, CellValue::from("")] {
            let result = validator.validate(&value, &rule);
            assert_eq!(result.messages(), vec!["empty value"]);
        }
    }

    #[test]
    fn test_optional_empty_passes() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(0, "Пол")
            .optional()
            .with_kind(ValueKind::dates(date(1900, 1, 1), date(2100, 12, 31)))
            .with_allow_list("Пол");

        assert!(validator.validate(&CellValue::Empty, &rule).passed());
        assert!(validator.validate(&CellValue::from(""), &rule).passed());
    }

    #[test]
    fn test_whitespace_checks_are_independent() {
        let result = check_whitespace(" a\nb ");
        assert_eq!(
            result.messages(),
            vec![
                "contains a leading space",
                "contains a trailing space",
                "contains a line break"
            ]
        );
        assert!(check_whitespace("Иванов").passed());
        assert!(check_whitespace("Анна Мария").passed());
    }

    #[test]
    fn test_hygiene_failure_skips_kind_check_but_not_allow_list() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(0, "Пол")
            .with_kind(ValueKind::AlphaText)
            .with_allow_list("Пол");

        let result = validator.validate(&CellValue::from(" Male"), &rule);
        assert_eq!(
            result.messages(),
            vec!["contains a leading space", "not in allowed set"]
        );
    }

    #[test]
    fn test_cyrillic_alphabet() {
        assert!(is_cyrillic_text("Салтыков-Щедрин"));
        assert!(is_cyrillic_text("ЁЛКИН"));
        assert!(is_cyrillic_text("ёжиков"));
        assert!(is_cyrillic_text("Анна Мария"));
        assert!(!is_cyrillic_text("Ivanov"));
        assert!(!is_cyrillic_text("Иванов1"));
        assert!(!is_cyrillic_text("Іванов"));
        assert!(!is_cyrillic_text("Иванов."));
    }

    #[test]
    fn test_alpha_rule_message() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(14, "Фамилия").with_kind(ValueKind::AlphaText);

        let result = validator.validate(&CellValue::from("Smith"), &rule);
        assert_eq!(
            result.messages(),
            vec!["contains characters other than Cyrillic, hyphen, or space"]
        );
    }

    #[test]
    fn test_digits_and_bounds() {
        let year = |text| check_digits(text, Some(1900), Some(2100));
        assert_eq!(year("19x5").messages(), vec!["value is not a number"]);
        assert_eq!(check_digits("-5", Some(0), Some(15)).messages(), vec!["value is not a number"]);
        assert_eq!(year("1899").messages(), vec!["less than minimum 1900"]);
        assert_eq!(year("2101").messages(), vec!["greater than maximum 2100"]);
        assert!(check_digits("2000", Some(1900), Some(2100)).passed());
        assert!(check_digits("0", Some(0), Some(15)).passed());
        assert!(check_digits("123", None, None).passed());
        assert_eq!(
            check_digits("99999999999999999999", Some(0), Some(15)).messages(),
            vec!["greater than maximum 15"]
        );
    }

    #[test]
    fn test_numeric_cell_in_digit_column() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(11, "Год").with_kind(ValueKind::digits(1900, 2100));

        assert!(validator.validate(&CellValue::from(2005.0), &rule).passed());
        assert_eq!(
            validator.validate(&CellValue::from(1850i64), &rule).messages(),
            vec!["less than minimum 1900"]
        );
        assert_eq!(
            validator.validate(&CellValue::from(2005.5), &rule).messages(),
            vec!["value is not a number"]
        );
    }

    #[test]
    fn test_numeric_cell_matches_text_allow_list() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(3, "Код").with_allow_list("Код");

        assert!(validator.validate(&CellValue::from(12.0), &rule).passed());
        assert_eq!(
            validator.validate(&CellValue::from(13.0), &rule).messages(),
            vec!["not in allowed set"]
        );
    }

    #[test]
    fn test_date_checks() {
        let min = date(1950, 1, 1);
        let max = date(2100, 12, 31);

        let bounded = |dt| check_date(&CellValue::from(dt), Some(min), Some(max));

        assert!(bounded(datetime(2020, 5, 17, 0)).passed());
        assert_eq!(
            bounded(datetime(1949, 12, 31, 23)).messages(),
            vec!["earlier than minimum 01.01.1950"]
        );
        assert_eq!(
            bounded(datetime(2101, 1, 1, 0)).messages(),
            vec!["later than maximum 31.12.2100"]
        );
        // Time of day is ignored at the boundary
        assert!(bounded(datetime(2100, 12, 31, 23)).passed());
        assert!(check_date(&CellValue::from(datetime(1800, 1, 1, 0)), None, None).passed());
    }

    #[test]
    fn test_text_in_date_column_is_format_error() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(9, "Дата выдачи")
            .with_kind(ValueKind::dates(date(1950, 1, 1), date(2100, 12, 31)));

        let result = validator.validate(&CellValue::from("01.01.2000"), &rule);
        assert_eq!(result.messages(), vec!["invalid date format"]);

        let result = validator.validate(&CellValue::from(36526.0), &rule);
        assert_eq!(result.messages(), vec!["invalid date format"]);
    }

    #[test]
    fn test_checksum_kind() {
        let lists = lists();
        let validator = CellValidator::new(&lists);
        let rule = ColumnRule::new(18, "СНИЛС").with_kind(ValueKind::ChecksumId);

        assert!(validator.validate(&CellValue::from("112-233-445 95"), &rule).passed());
        assert_eq!(
            validator.validate(&CellValue::from("112-233-445 95 "), &rule).messages(),
            vec!["contains a trailing space"]
        );
        assert_eq!(
            validator.validate(&CellValue::from(11223344595.0), &rule).messages(),
            vec!["invalid format (XXX-XXX-XXX CC)"]
        );
    }
}
