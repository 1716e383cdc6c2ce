//! Report generation for collected metric runs.
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: terminal output with ANSI colors and per-provider icons
//! - **JSON**: machine-readable structured data for CI pipelines
//!
//! Both operate on the same input: the ordered slice of `ProviderRun` records
//! produced by the registry, failures included.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
