use crate::Result;
use crate::artifact::PipelineContext;
use crate::summary::Summary;
use core::fmt;
use ohno::IntoAppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The typed result of one provider's extraction for one run.
///
/// A uniform envelope so that values from heterogeneous providers can be
/// recorded in history snapshots and compared without the registry knowing
/// concrete metric semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    /// A non-negative count (lines, bytes, warnings, ...).
    Count(u64),

    /// A percentage in the range 0..=100.
    Percentage(f64),
}

impl MetricValue {
    #[must_use]
    pub const fn as_count(&self) -> Option<u64> {
        match self {
            Self::Count(count) => Some(*count),
            Self::Percentage(_) => None,
        }
    }

    #[must_use]
    pub const fn as_percentage(&self) -> Option<f64> {
        match self {
            Self::Percentage(percentage) => Some(*percentage),
            Self::Count(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Percentage(percentage) => write!(f, "{percentage}%"),
        }
    }
}

/// A pluggable metric extractor/comparator.
///
/// Each provider is identified by a stable string key used to select it in
/// configuration and to key its values in history snapshots; the key must
/// stay stable across versions for history continuity.
///
/// Provider arguments are provider-specific typed structures, carried through
/// the registry as a raw JSON value and decoded by the provider itself (see
/// [`decode_args`]).
pub trait MetricProvider: Send + Sync {
    /// Stable identifier (e.g. `"lines_of_code"`).
    fn identifier(&self) -> &'static str;

    /// Human-readable label used in summaries.
    fn description(&self) -> &'static str;

    /// Check that raw arguments decode into this provider's argument type.
    ///
    /// # Errors
    ///
    /// Returns a configuration-conflict error for arguments of the wrong shape.
    fn check_args(&self, raw_args: Option<&Value>) -> Result<()>;

    /// Produce this run's metric value from the artifact.
    ///
    /// Must aggregate into exactly one value per invocation, as a pure
    /// function of the artifact content and arguments. Fails without a
    /// partial result when the artifact's structure does not match what the
    /// provider requires.
    ///
    /// # Errors
    ///
    /// Returns a malformed-artifact error for missing/mistyped artifact
    /// fields, or an I/O error if the artifact cannot be loaded.
    fn extract(&self, ctx: &PipelineContext, raw_args: Option<&Value>) -> Result<MetricValue>;

    /// Compare a value with an optional prior value and render a summary.
    ///
    /// # Errors
    ///
    /// Returns an error when a value does not have the shape this provider
    /// produces (e.g. a history entry recorded under this identifier by a
    /// different kind of provider).
    fn summary(&self, current: &MetricValue, prior: Option<&MetricValue>, raw_args: Option<&Value>) -> Result<Summary>;
}

/// Decode raw provider arguments into a provider's typed argument structure.
/// Absent arguments decode to `None` (meaning "include everything" for the
/// built-in providers).
///
/// # Errors
///
/// Returns a configuration-conflict error when the arguments do not match the
/// provider's argument type.
pub fn decode_args<T: DeserializeOwned>(identifier: &str, raw_args: Option<&Value>) -> Result<Option<T>> {
    match raw_args {
        None => Ok(None),
        Some(raw) => serde_json::from_value(raw.clone())
            .map(Some)
            .into_app_err_with(|| format!("configuration conflict: invalid arguments for provider '{identifier}'")),
    }
}
