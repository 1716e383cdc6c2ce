//! A tool to track build and test metrics across CI runs.
//!
//! # Overview
//!
//! `buildtrend` reads a build/test artifact (a coverage report in JSON form),
//! runs a set of metric providers over it, compares each extracted value
//! against the most recent value recorded in a local history file, and renders
//! a styled change summary. It is meant to run in CI pipelines to surface
//! regressions (growth in code size, drops in coverage) across commits.
//!
//! # Quick Start
//!
//! ```bash
//! buildtrend init                 # generate buildtrend.toml
//! buildtrend report               # collect, compare, and print the summary
//! ```
//!
//! # Commands
//!
//! - `report`: run the configured providers and print/write the change summary
//! - `init`: generate a default configuration file
//! - `validate`: check a configuration file without running the pipeline
//!
//! # CI Integration
//!
//! ```yaml
//! - name: Track build metrics
//!   run: buildtrend report --json metrics.json
//! ```
//!
//! Use `--no-save` on pull-request builds to compare against the recorded
//! baseline without advancing it.

use buildtrend::{ConsoleHost, Result, run};

fn main() -> Result<()> {
    run(&mut ConsoleHost, std::env::args())
}
