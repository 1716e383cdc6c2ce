//! Access to the parsed build/test artifact.
//!
//! The artifact is a coverage report in JSON form containing a sequence of
//! "target" entries, each with a dot-separated `name` and numeric fields such
//! as `executableLines`. Providers depend only on this minimal shape; the
//! full schema belongs to the tool that produced the report.
//!
//! [`PipelineContext`] owns the artifact for the duration of one report
//! generation: the report is loaded lazily on first access and cached so that
//! every provider in the run sees the same immutable tree.

pub mod coverage_report;

mod context;

pub use context::PipelineContext;
