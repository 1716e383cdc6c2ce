//! Command-line interface and orchestration for buildtrend
//!
//! This module implements the CLI commands and coordinates the other modules
//! to perform end-to-end metric collection, comparison, and reporting. It
//! handles argument parsing, configuration management, and the high-level
//! workflows.
//!
//! # Implementation Model
//!
//! The module is organized around three commands:
//!
//! ## Commands
//!
//! - **report**: Load the configured providers, extract metrics from the
//!   build artifact, compare them against the most recent values in history,
//!   render console/JSON reports, and record this run's snapshot
//! - **init**: Generate a default configuration file
//! - **validate**: Check configuration file syntax and the run plan without
//!   touching the artifact
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to
//! the appropriate command handler. The report command follows this pattern:
//!
//! 1. Parse arguments and load configuration
//! 2. Validate the run plan against the provider registry
//! 3. Run every configured provider, isolating per-provider failures
//! 4. Generate reports using the reports module
//! 5. Append this run's snapshot to history (unless `--no-save`)
//!
//! The `common` module provides shared functionality like logging setup and
//! color mode handling. All console output flows through the `Host`
//! abstraction so that tests can drive the full CLI in memory.

mod common;
mod config;
mod host;
mod init;
mod report;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use common::{ColorMode, LogLevel};
pub use host::{ConsoleHost, Host};
pub use init::{InitArgs, init_config};
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
