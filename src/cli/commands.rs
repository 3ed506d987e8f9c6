//! CLI command implementations
//!
//! `validate` follows a fixed sequence:
//! 1. Load and validate the configuration
//! 2. Load schema and allow-lists, build the rule table
//! 3. Validate the workbook(s), one report each
//! 4. Print the JSON summary
//!
//! Any failure in steps 1-2 aborts before a single workbook is opened.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::batch::{BatchRunner, DatasetStatus, DatasetSummary, FileReportSink, SourceSettings};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::schema::{AllowLists, RuleTable, SchemaLoader};
use crate::validator::{check_national_id, NationalId};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure (`sheetcheck.json`)
///
/// Relative paths are resolved against the directory of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for workbooks (optional, default ".")
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Schema file (required)
    pub schema_path: PathBuf,

    /// Allow-list file (optional)
    #[serde(default)]
    pub allow_lists_path: Option<PathBuf>,

    /// Designated sheet (optional, default "Шаблон")
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Header rows above the data (optional, default 1)
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// Report file extension (optional, default "log")
    #[serde(default = "default_report_extension")]
    pub report_extension: String,

    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_sheet_name() -> String {
    "Шаблон".to_string()
}
fn default_header_rows() -> usize {
    1
}
fn default_report_extension() -> String {
    "log".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.header_rows == 0 {
            return Err(CliError::config_error("header_rows must be >= 1"));
        }

        if self.sheet_name.is_empty() {
            return Err(CliError::config_error("sheet_name must not be empty"));
        }

        let ext = &self.report_extension;
        if ext.is_empty() || ext.contains('.') || ext.contains(&['/', '\\'][..]) {
            return Err(CliError::config_error(format!(
                "Invalid report_extension: '{}'. Expected a bare extension such as 'log'.",
                ext
            )));
        }
        // A report must never replace the workbook it describes
        if ext.eq_ignore_ascii_case(crate::batch::WORKBOOK_EXTENSION) {
            return Err(CliError::config_error("report_extension must not be 'xlsx'"));
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Input directory, resolved
    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.input_dir)
    }

    /// Loader for the configured schema and allow-lists
    pub fn schema_loader(&self) -> SchemaLoader {
        SchemaLoader::new(
            self.resolve(&self.schema_path),
            self.allow_lists_path.as_deref().map(|p| self.resolve(p)),
        )
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            sheet_name: self.sheet_name.clone(),
            header_rows: self.header_rows,
        }
    }
}

/// Main CLI entry point
///
/// Errors are reported as a JSON error response and returned for the exit
/// code.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::set_min_severity(cli.min_severity());

    let result = run_command(cli.command);
    if let Err(e) = &result {
        log_event_with_fields(
            Event::RunFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
        write_error(e.code_str(), e.message())?;
    }
    result
}

/// Run a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate { config, file } => validate(&config, file.as_deref()),
        Command::Schema { config } => schema(&config),
        Command::CheckId { value } => check_id(&value),
    }
}

/// Validate workbooks and print the run summary
pub fn validate(config_path: &Path, file: Option<&Path>) -> CliResult<()> {
    log_event(Event::RunStart);

    let config = Config::load(config_path)?;
    let config_shown = config_path.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("config", config_shown.as_str())]);

    let (rules, allow_lists) = load_rules(&config)?;

    let runner = BatchRunner::new(
        &rules,
        &allow_lists,
        config.source_settings(),
        FileReportSink::new(config.report_extension.as_str()),
    );

    let datasets = match file {
        Some(path) => vec![runner.run_file(path)?],
        None => runner.run_dir(&config.input_path())?,
    };

    let data = run_summary(rules.schema_id(), &datasets);
    let total = datasets.len().to_string();
    log_event_with_fields(Event::RunComplete, &[("datasets", total.as_str())]);

    write_response(data)
}

/// Load the schema and print the resolved rule table
pub fn schema(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let (rules, allow_lists) = load_rules(&config)?;

    let columns: Vec<_> = rules.iter().collect();
    let lists: Vec<_> = {
        let mut names: Vec<&String> = allow_lists.names().collect();
        names.sort();
        names
    };

    write_response(json!({
        "schema_id": rules.schema_id(),
        "columns": columns,
        "allow_lists": lists,
    }))
}

/// Check one masked national ID
pub fn check_id(value: &str) -> CliResult<()> {
    let result = check_national_id(value);
    let computed = NationalId::parse(value).ok().map(|id| id.computed_check());

    write_response(json!({
        "value": value,
        "valid": result.passed(),
        "computed_check": computed,
        "messages": result.messages(),
    }))
}

fn load_rules(config: &Config) -> CliResult<(RuleTable, AllowLists)> {
    let loader = config.schema_loader();
    let (rules, allow_lists) = loader.load()?;

    let shown = loader.schema_path().display().to_string();
    let columns = rules.len().to_string();
    let lists = allow_lists.len().to_string();
    log_event_with_fields(
        Event::SchemaLoaded,
        &[
            ("schema", shown.as_str()),
            ("schema_id", rules.schema_id()),
            ("columns", columns.as_str()),
            ("allow_lists", lists.as_str()),
        ],
    );

    Ok((rules, allow_lists))
}

fn run_summary(schema_id: &str, datasets: &[DatasetSummary]) -> serde_json::Value {
    let count = |status: DatasetStatus| datasets.iter().filter(|d| d.status == status).count();

    json!({
        "schema_id": schema_id,
        "datasets": datasets,
        "clean": count(DatasetStatus::Clean),
        "invalid": count(DatasetStatus::Invalid),
        "skipped": count(DatasetStatus::Skipped),
    })
}
