use super::coverage_report;
use crate::Result;
use crate::diag::Diag;
use camino::Utf8PathBuf;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Per-run pipeline context handed to every provider.
///
/// Holds the artifact accessor (cached after first load) and the diagnostics
/// sink. Immutable from the providers' point of view; safe to share across
/// worker threads.
#[derive(Debug)]
pub struct PipelineContext {
    artifact_path: Utf8PathBuf,
    report: Mutex<Option<Arc<Value>>>,
    diag: Diag,
}

impl PipelineContext {
    #[must_use]
    pub const fn new(artifact_path: Utf8PathBuf, diag: Diag) -> Self {
        Self {
            artifact_path,
            report: Mutex::new(None),
            diag,
        }
    }

    #[must_use]
    pub const fn diag(&self) -> &Diag {
        &self.diag
    }

    /// The parsed coverage report, loaded on first access and cached for the
    /// rest of the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be read or parsed as JSON.
    pub fn coverage_report(&self) -> Result<Arc<Value>> {
        let mut cached = self.report.lock().expect("artifact cache lock poisoned");
        if let Some(report) = cached.as_ref() {
            return Ok(Arc::clone(report));
        }

        let report = Arc::new(coverage_report::load(&self.artifact_path)?);
        *cached = Some(Arc::clone(&report));
        Ok(report)
    }
}
