//! Core library for the `buildtrend` tool.
//!
//! This library consolidates all functionality for buildtrend, which collects
//! quantitative metrics about a project's build and test artifacts, compares
//! them against previously recorded values, and renders a change summary.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`artifact`]: Access to the parsed build/test artifact
//! - [`providers`]: Metric provider capability, registry, and built-in providers
//! - [`summary`]: Generic comparison and summary rendering
//! - [`history`]: Recorded metric snapshots from past runs
//! - [`reports`]: Report generation (console and JSON)
//! - [`diag`]: User-facing diagnostics sink

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod artifact;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod diag;

#[doc(hidden)]
pub mod history;

#[doc(hidden)]
pub mod providers;

#[doc(hidden)]
pub mod reports;

#[doc(hidden)]
pub mod summary;

pub use crate::commands::{ConsoleHost, Host, run};
