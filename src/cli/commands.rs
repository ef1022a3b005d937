//! CLI command implementations
//!
//! Each command loads what it needs, runs, and returns the `data` payload
//! of its response. `run_command` writes the payload or the error as one
//! JSON line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::{ProductId, Snapshot};
use crate::observability::{log_event, Event, Logger, QueryMetrics, Severity};
use crate::pricing::{apply_discount, Discount};
use crate::query::{select, Predicate};
use crate::reports::{Report, ReportParams};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot JSON file (required). Relative paths resolve against the
    /// directory holding the config file.
    pub snapshot_path: String,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Report parameters (optional, every field defaulted)
    #[serde(default)]
    pub reports: ReportParams,

    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Loads and validates configuration from file, then applies its log
    /// level to the process-wide logger
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Logger::set_min_severity(config.severity()?);

        let snapshot = config.snapshot_file();
        let snapshot = snapshot.to_string_lossy();
        log_event(
            Event::ConfigLoaded,
            &[("log_level", config.log_level.as_str()), ("snapshot_path", &*snapshot)],
        );

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.snapshot_path.trim().is_empty() {
            return Err(CliError::config_error("snapshot_path must not be empty"));
        }

        self.severity()?;

        self.reports.validate().map_err(CliError::config_error)?;

        Ok(())
    }

    /// The configured minimum log severity
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    pub fn snapshot_file(&self) -> PathBuf {
        self.base_dir.join(&self.snapshot_path)
    }

    /// Reads and validates the configured snapshot
    pub fn load_snapshot(&self) -> CliResult<Snapshot> {
        let path = self.snapshot_file();
        let content = fs::read_to_string(&path)
            .map_err(|e| CliError::io_error(format!("Failed to read snapshot {}: {}", path.display(), e)))?;

        let snapshot = Snapshot::from_json(&content)?;

        let counts = [
            snapshot.customers().len(),
            snapshot.orders().len(),
            snapshot.products().len(),
        ]
        .map(|n| n.to_string());
        log_event(
            Event::SnapshotLoaded,
            &[
                ("customers", counts[0].as_str()),
                ("orders", counts[1].as_str()),
                ("products", counts[2].as_str()),
            ],
        );

        Ok(snapshot)
    }
}

/// Parses arguments and runs the command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Runs `cmd`, writing its response or error line to stdout and the
/// counter totals to the log
pub fn run_command(cmd: Command) -> CliResult<()> {
    let outcome = execute(cmd);
    log_metrics();

    match outcome {
        Ok(data) => write_response(data),
        Err(err) => {
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

fn log_metrics() {
    let fields = QueryMetrics::global().snapshot().fields();
    let fields: Vec<(&str, &str)> = fields.iter().map(|(name, value)| (*name, value.as_str())).collect();
    log_event(Event::MetricsReported, &fields);
}

/// Runs `cmd` and returns the response payload
pub fn execute(cmd: Command) -> CliResult<Value> {
    match cmd {
        Command::List => list(),
        Command::Run { config, report } => run_report(&config, &report),
        Command::Discount {
            config,
            category,
            percent,
        } => discount(&config, &category, percent),
    }
}

/// The report catalogue
pub fn list() -> CliResult<Value> {
    Ok(serde_json::to_value(Report::catalogue())?)
}

/// Runs one named report
pub fn run_report(config_path: &Path, name: &str) -> CliResult<Value> {
    let config = Config::load(config_path)?;
    let report: Report = name.parse()?;
    let snapshot = config.load_snapshot()?;

    let output = report.execute(&snapshot, &config.reports)?;

    Ok(json!({
        "report": report.name(),
        "shape": output.shape(),
        "result": output.into_value(),
    }))
}

/// Discounts every product of `category` in a loaded copy of the snapshot
pub fn discount(config_path: &Path, category: &str, percent: f64) -> CliResult<Value> {
    let config = Config::load(config_path)?;
    let discount = Discount::percent(percent)?;
    let mut snapshot = config.load_snapshot()?;

    let selected: Vec<ProductId> = select(snapshot.products(), &Predicate::in_category(category))
        .iter()
        .map(|p| p.id)
        .collect();
    let repriced = apply_discount(&mut snapshot, selected, &discount);

    let products = select(snapshot.products(), &Predicate::in_category(category));

    Ok(json!({
        "category": category,
        "percent": discount.value(),
        "repriced": repriced,
        "products": products,
    }))
}
