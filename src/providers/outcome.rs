use super::MetricValue;
use crate::summary::Summary;
use serde::Serialize;
use std::sync::Arc;

/// The result of running one provider, success or failure.
///
/// Failures are carried as data rather than propagated so that one
/// misbehaving provider cannot hide the results of the others.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderOutcome {
    /// Extraction and comparison succeeded.
    Collected { value: MetricValue, summary: Summary },

    /// Extraction or comparison failed for this provider.
    /// The error is serialized as a string.
    Failed {
        #[serde(serialize_with = "serialize_error")]
        error: Arc<ohno::AppError>,
    },
}

/// Serialize `Arc<ohno::AppError>` as a string
fn serialize_error<S>(error: &Arc<ohno::AppError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{error}"))
}

impl ProviderOutcome {
    /// Returns `true` if the outcome is `Collected`.
    #[must_use]
    pub const fn is_collected(&self) -> bool {
        matches!(self, Self::Collected { .. })
    }

    /// The extracted value, for successful outcomes.
    #[must_use]
    pub const fn value(&self) -> Option<&MetricValue> {
        match self {
            Self::Collected { value, .. } => Some(value),
            Self::Failed { .. } => None,
        }
    }

    /// The rendered summary, for successful outcomes.
    #[must_use]
    pub const fn summary(&self) -> Option<&Summary> {
        match self {
            Self::Collected { summary, .. } => Some(summary),
            Self::Failed { .. } => None,
        }
    }

    /// Returns a string describing the status of this outcome.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Collected { .. } => "Collected",
            Self::Failed { .. } => "Failed",
        }
    }
}

/// One provider's identifier paired with its outcome, in run order.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRun {
    pub identifier: String,

    #[serde(flatten)]
    pub outcome: ProviderOutcome,
}
