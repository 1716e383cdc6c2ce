//! The report pipeline: collect, compare, render, record.

use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::artifact::PipelineContext;
use crate::diag::Diag;
use crate::history::{History, Snapshot};
use crate::providers::Registry;
use crate::reports::{generate_console, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

/// Log target for the report command
const LOG_TARGET: &str = "    report";

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Path to the build artifact, overriding the configured path
    #[arg(long, value_name = "PATH")]
    pub artifact: Option<Utf8PathBuf>,

    /// Path to configuration file (default is `buildtrend.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Path to the history file, overriding the configured path
    #[arg(long, value_name = "PATH")]
    pub history: Option<Utf8PathBuf>,

    /// Write a machine-readable report to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Compare against history without recording this run's snapshot
    #[arg(long)]
    pub no_save: bool,

    /// Show per-target notices while extracting metrics
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Suppress extraction notices entirely
    #[arg(long, short = 's', conflicts_with = "verbose")]
    pub silent: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Run the configured providers over the artifact, print/write the change
/// summary, and record this run's snapshot.
///
/// Provider failures are rendered in the report and do not fail the command;
/// only configuration and I/O problems do.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the history file cannot
/// be read or written, or a report file cannot be written.
pub fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let registry = Registry::with_builtin_providers();
    config.validate_plan(&registry)?;

    let artifact_path = args.artifact.clone().unwrap_or_else(|| config.artifact.clone());
    let history_path = args.history.clone().unwrap_or_else(|| config.history.clone());

    let diag = Diag::new(args.verbose, args.silent);
    let ctx = PipelineContext::new(artifact_path, diag);
    let mut history = History::load(&history_path)?;

    log::info!(target: LOG_TARGET, "Running {} providers", config.provider.len());
    let runs = registry.run_all(&config.plan(), &ctx, &history)?;

    let mut console_output = String::new();
    generate_console(&runs, args.color.use_colors(), &mut console_output)?;
    let _ = write!(host.output(), "{console_output}");

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(&runs, Utc::now(), &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    }

    if args.no_save {
        log::info!(target: LOG_TARGET, "Skipping history update");
        return Ok(());
    }

    let mut snapshot = Snapshot::now();
    for run in &runs {
        if let Some(value) = run.outcome.value() {
            let _ = snapshot.values.insert(run.identifier.clone(), *value);
        }
    }

    // A run where every provider failed records nothing.
    if snapshot.values.is_empty() {
        log::info!(target: LOG_TARGET, "No values collected, leaving history untouched");
        return Ok(());
    }

    history.append(snapshot);
    history.save(&history_path)?;

    Ok(())
}
