//! Dataset Validation Tests
//!
//! End-to-end: dataset in, report lines out.
//! - Failures are grouped by physical row, columns in ascending order
//! - Every failing check of a cell is reported, joined in check order
//! - Empty first-column rows end nothing; data after them is flagged once
//! - Header mismatches never stop row validation

use chrono::NaiveDate;
use sheetcheck::report::{DatasetOutcome, ReportBuilder, EMPTY_ROWS_WARNING};
use sheetcheck::schema::{AllowLists, ColumnRule, RuleTable, SheetSchema, ValueKind};
use sheetcheck::source::Dataset;
use sheetcheck::validator::{validate_dataset, CellValidator, CellValue, DatasetReport};

// =============================================================================
// Helper Functions
// =============================================================================

const HEADERS: [&str; 12] = [
    "Название документа",
    "Статус документа",
    "Серия документа",
    "Номер документа",
    "Дата выдачи",
    "Фамилия",
    "Имя",
    "Отчество",
    "Дата рождения",
    "Пол",
    "СНИЛС",
    "Год поступления",
];

fn allow_lists() -> AllowLists {
    let mut lists = AllowLists::new();
    lists.insert("Название документа", ["Диплом о среднем профессиональном образовании"]);
    lists.insert("Статус документа", ["Оригинал", "Дубликат"]);
    lists.insert("Пол", ["Мужской", "Женский"]);
    lists
}

fn rules(lists: &AllowLists) -> RuleTable {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let columns = vec![
        ColumnRule::new(0, HEADERS[0]).with_allow_list("Название документа"),
        ColumnRule::new(1, HEADERS[1]).with_allow_list("Статус документа"),
        ColumnRule::new(2, HEADERS[2]).optional().with_kind(ValueKind::Text),
        ColumnRule::new(3, HEADERS[3]).with_kind(ValueKind::Text),
        ColumnRule::new(4, HEADERS[4])
            .with_kind(ValueKind::dates(date(1950, 1, 1), date(2030, 12, 31))),
        ColumnRule::new(5, HEADERS[5]).with_kind(ValueKind::AlphaText),
        ColumnRule::new(6, HEADERS[6]).with_kind(ValueKind::AlphaText),
        ColumnRule::new(7, HEADERS[7]).optional().with_kind(ValueKind::AlphaText),
        ColumnRule::new(8, HEADERS[8])
            .with_kind(ValueKind::dates(date(1900, 1, 1), date(2015, 12, 31))),
        ColumnRule::new(9, HEADERS[9]).with_allow_list("Пол"),
        ColumnRule::new(10, HEADERS[10]).optional().with_kind(ValueKind::ChecksumId),
        ColumnRule::new(11, HEADERS[11]).with_kind(ValueKind::digits(1900, 2100)),
    ];
    RuleTable::build(SheetSchema::new("frdo", columns), lists).unwrap()
}

fn headers() -> Vec<String> {
    HEADERS.iter().map(|h| h.to_string()).collect()
}

fn good_row() -> Vec<CellValue> {
    vec![
        CellValue::from("Диплом о среднем профессиональном образовании"),
        CellValue::from("Оригинал"),
        CellValue::from("11"),
        CellValue::from("0012345"),
        CellValue::from(NaiveDate::from_ymd_opt(2020, 6, 30).unwrap()),
        CellValue::from("Иванова"),
        CellValue::from("Анна-Мария"),
        CellValue::Empty,
        CellValue::from(NaiveDate::from_ymd_opt(2001, 2, 3).unwrap()),
        CellValue::from("Женский"),
        CellValue::from("112-233-445 95"),
        CellValue::from(2016_i64),
    ]
}

fn run(rows: Vec<Vec<CellValue>>) -> (DatasetReport, Vec<String>) {
    run_with_headers(headers(), rows)
}

fn run_with_headers(
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
) -> (DatasetReport, Vec<String>) {
    let lists = allow_lists();
    let table = rules(&lists);
    let dataset = Dataset::new("registry.xlsx", headers, rows);

    let report = validate_dataset(&dataset, &table, &lists);
    let lines = ReportBuilder::new(&table).build(&DatasetOutcome::Validated(report.clone()));
    (report, lines)
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_clean_dataset() {
    let (report, lines) = run(vec![good_row(), good_row()]);

    assert!(report.is_clean());
    assert_eq!(lines, vec![String::new(), "rows checked (excluding empty): 2".to_string()]);
}

/// One bad cell in the second data row is reported under physical row 3.
#[test]
fn test_bad_year_reported_on_row_three() {
    let mut bad = good_row();
    bad[11] = CellValue::from("19x5");
    let (_, lines) = run(vec![good_row(), bad, good_row()]);

    assert_eq!(
        lines,
        vec![
            "Row 3:".to_string(),
            "\tColumn 12: Год поступления | \"19x5\" | value is not a number".to_string(),
            String::new(),
            "rows checked (excluding empty): 3".to_string(),
        ]
    );
}

#[test]
fn test_multiple_columns_ascending() {
    let mut bad = good_row();
    bad[11] = CellValue::from(1850_i64);
    bad[5] = CellValue::from(" Иванова");
    bad[9] = CellValue::from("Ж");
    bad[4] = CellValue::from("30.06.2020");
    bad[3] = CellValue::Empty;
    let (report, lines) = run(vec![bad]);

    assert_eq!(report.violation_count(), 5);
    assert_eq!(
        lines[..6],
        [
            "Row 2:".to_string(),
            "\tColumn 04: Номер документа | <empty> | empty value".to_string(),
            "\tColumn 05: Дата выдачи | \"30.06.2020\" | invalid date format".to_string(),
            "\tColumn 06: Фамилия | \" Иванова\" | contains a leading space".to_string(),
            "\tColumn 10: Пол | \"Ж\" | not in allowed set".to_string(),
            "\tColumn 12: Год поступления | 1850 | less than minimum 1900".to_string(),
        ]
    );
}

#[test]
fn test_every_failing_check_is_listed() {
    let mut bad = good_row();
    bad[5] = CellValue::from(" Ivanova \nx");
    bad[10] = CellValue::from("112-233-445 96");
    bad[8] = CellValue::from(NaiveDate::from_ymd_opt(1899, 12, 31).unwrap());
    let (_, lines) = run(vec![bad]);

    assert_eq!(
        lines[1],
        "\tColumn 06: Фамилия | \" Ivanova \\nx\" | contains a leading space, contains a line break"
    );
    assert_eq!(
        lines[2],
        "\tColumn 09: Дата рождения | 31.12.1899 | earlier than minimum 01.01.1900"
    );
    assert_eq!(
        lines[3],
        "\tColumn 11: СНИЛС | \"112-233-445 96\" | checksum error (95 != 96)"
    );
}

#[test]
fn test_optional_empty_cells_pass() {
    let mut row = good_row();
    row[2] = CellValue::Empty;
    row[7] = CellValue::from("");
    row[10] = CellValue::Empty;
    let (report, _) = run(vec![row]);

    assert!(report.is_clean());
}

// =============================================================================
// Empty Rows
// =============================================================================

#[test]
fn test_single_warning_for_many_gaps() {
    let blank = vec![CellValue::Empty; 12];
    let (report, lines) = run(vec![
        good_row(),
        blank.clone(),
        good_row(),
        blank.clone(),
        blank.clone(),
        good_row(),
        blank,
    ]);

    assert!(report.empty_row_before_end);
    assert_eq!(report.rows_validated, 3);
    assert_eq!(lines.iter().filter(|l| l.as_str() == EMPTY_ROWS_WARNING).count(), 1);
    assert_eq!(
        lines[lines.len() - 2..],
        [
            EMPTY_ROWS_WARNING.to_string(),
            "rows checked (excluding empty): 3".to_string()
        ]
    );
}

/// A row whose first column is empty is skipped even if the rest is garbage.
#[test]
fn test_empty_first_column_not_validated() {
    let mut row = vec![CellValue::from("garbage"); 12];
    row[0] = CellValue::Empty;
    let (report, _) = run(vec![row]);

    assert!(report.rows.is_empty());
    assert_eq!(report.rows_validated, 0);
    assert!(!report.empty_row_before_end);
}

/// Row numbers keep counting through skipped rows.
#[test]
fn test_row_numbers_are_physical() {
    let mut bad = good_row();
    bad[6] = CellValue::from("Anna");
    let (report, _) = run(vec![good_row(), vec![], bad]);

    assert_eq!(report.rows[0].row_number, 4);
    assert!(report.empty_row_before_end);
}

// =============================================================================
// Headers
// =============================================================================

#[test]
fn test_header_mismatch_does_not_stop_validation() {
    let mut headers = headers();
    headers[2] = "Серия".to_string();
    headers[5] = "  Фамилия  ".to_string();
    headers.truncate(11);

    let mut bad = good_row();
    bad[11] = CellValue::from("20x1");
    let (report, lines) = run_with_headers(headers, vec![bad]);

    assert_eq!(report.header_mismatches.len(), 2);
    assert_eq!(
        lines[0],
        "column order or headers violated: column 03 expected \"Серия документа\", found \"Серия\""
    );
    assert_eq!(
        lines[1],
        "column order or headers violated: column 12 expected \"Год поступления\", found nothing"
    );
    assert_eq!(lines[2], "Row 2:");
}

// =============================================================================
// Cell Validator Properties
// =============================================================================

#[test]
fn test_required_empty_gives_exactly_empty_value() {
    let lists = allow_lists();
    let table = rules(&lists);
    let validator = CellValidator::new(&lists);

    for rule in table.iter().filter(|r| !r.is_optional()) {
        let result = validator.validate(&CellValue::Empty, rule);
        assert_eq!(result.messages(), vec!["empty value"], "column {}", rule.index);
    }
}

#[test]
fn test_below_minimum_gives_exactly_minimum_message() {
    let lists = allow_lists();
    let table = rules(&lists);
    let validator = CellValidator::new(&lists);
    let year = table.rule(11).unwrap();

    assert_eq!(
        validator.validate(&CellValue::from("1899"), year).messages(),
        vec!["less than minimum 1900"]
    );
    assert_eq!(
        validator.validate(&CellValue::from("2101"), year).messages(),
        vec!["greater than maximum 2100"]
    );
}

#[test]
fn test_validation_is_deterministic() {
    let mut bad = good_row();
    bad[5] = CellValue::from("Ivanova ");
    let (_, first) = run(vec![bad.clone()]);
    for _ in 0..20 {
        let (_, again) = run(vec![bad.clone()]);
        assert_eq!(first, again);
    }
}
