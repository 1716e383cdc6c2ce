use super::{MetricProvider, ProviderOutcome, ProviderRun};
use crate::Result;
use crate::artifact::PipelineContext;
use crate::history::History;
use crate::providers::{LinesOfCodeProvider, TestCoverageProvider};
use ohno::app_err;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Log target for the registry
const LOG_TARGET: &str = "  registry";

/// One entry of a run plan: a provider identifier and its raw arguments.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub identifier: String,
    pub args: Option<Value>,
}

/// Registry of metric providers keyed by their stable identifiers.
///
/// Providers are registered at configuration-load time; running resolves an
/// identifier and executes `extract` then `summary`. Extraction or comparison
/// failures become per-provider failure records instead of aborting the run,
/// so one misbehaving provider cannot hide the results of the others.
#[derive(Default)]
pub struct Registry {
    providers: BTreeMap<&'static str, Box<dyn MetricProvider>>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in provider.
    #[must_use]
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self::new();

        // Built-in identifiers are distinct by construction.
        registry
            .register(Box::new(LinesOfCodeProvider))
            .expect("built-in provider identifiers must be unique");
        registry
            .register(Box::new(TestCoverageProvider))
            .expect("built-in provider identifiers must be unique");

        registry
    }

    /// Register a provider under its identifier.
    ///
    /// # Errors
    ///
    /// Returns a configuration-conflict error for a duplicate identifier.
    pub fn register(&mut self, provider: Box<dyn MetricProvider>) -> Result<()> {
        let identifier = provider.identifier();
        if self.providers.contains_key(identifier) {
            return Err(app_err!("configuration conflict: duplicate provider identifier '{identifier}'"));
        }

        let _ = self.providers.insert(identifier, provider);
        Ok(())
    }

    /// Look up a provider by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&dyn MetricProvider> {
        self.providers.get(identifier).map(Box::as_ref)
    }

    /// Identifiers of all registered providers.
    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.keys().copied()
    }

    /// Run one provider: extract a value from the artifact, compare it with
    /// the prior value from history, and render a summary.
    ///
    /// Configuration conflicts (unknown identifier, mistyped arguments) are
    /// returned as errors and abort the run; extraction and comparison
    /// failures are converted into a [`ProviderOutcome::Failed`] record.
    ///
    /// # Errors
    ///
    /// Returns a configuration-conflict error for an unknown identifier or
    /// arguments of the wrong shape.
    pub fn run(&self, entry: &PlanEntry, ctx: &PipelineContext, history: &History) -> Result<ProviderRun> {
        let identifier = entry.identifier.as_str();
        let provider = self
            .get(identifier)
            .ok_or_else(|| app_err!("configuration conflict: unknown provider identifier '{identifier}'"))?;

        provider.check_args(entry.args.as_ref())?;

        let outcome = match Self::run_provider(provider, ctx, entry.args.as_ref(), history) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Provider '{identifier}' failed: {e}");
                ProviderOutcome::Failed { error: Arc::new(e) }
            }
        };

        Ok(ProviderRun {
            identifier: identifier.to_string(),
            outcome,
        })
    }

    /// Run every entry of a plan in order, isolating per-provider failures.
    ///
    /// # Errors
    ///
    /// Returns an error only for configuration conflicts.
    pub fn run_all(&self, plan: &[PlanEntry], ctx: &PipelineContext, history: &History) -> Result<Vec<ProviderRun>> {
        plan.iter().map(|entry| self.run(entry, ctx, history)).collect()
    }

    fn run_provider(
        provider: &dyn MetricProvider,
        ctx: &PipelineContext,
        args: Option<&Value>,
        history: &History,
    ) -> Result<ProviderOutcome> {
        let identifier = provider.identifier();
        log::debug!(target: LOG_TARGET, "Extracting metric for provider '{identifier}'");

        let value = provider.extract(ctx, args)?;
        let prior = history.previous(identifier);
        let summary = provider.summary(&value, prior, args)?;

        Ok(ProviderOutcome::Collected { value, summary })
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diag;
    use crate::history::Snapshot;
    use crate::providers::MetricValue;
    use crate::summary::SummaryStyle;
    use camino::Utf8PathBuf;
    use serde_json::json;

    fn write_artifact(dir: &tempfile::TempDir, content: &Value) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("coverage.json")).unwrap();
        std::fs::write(&path, serde_json::to_string(content).unwrap()).unwrap();
        path
    }

    fn context(path: Utf8PathBuf) -> PipelineContext {
        PipelineContext::new(path, Diag::with_writer(false, true, Vec::new()))
    }

    fn plan(identifier: &str) -> PlanEntry {
        PlanEntry {
            identifier: identifier.to_string(),
            args: None,
        }
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = Registry::with_builtin_providers();
        let result = registry.register(Box::new(LinesOfCodeProvider));
        assert!(result.unwrap_err().to_string().contains("duplicate provider identifier"));
    }

    #[test]
    fn test_unknown_identifier_is_a_configuration_conflict() {
        let registry = Registry::with_builtin_providers();
        let tmp = tempfile::tempdir().unwrap();
        let path = write_artifact(&tmp, &json!({"targets": []}));

        let result = registry.run(&plan("binary_size"), &context(path), &History::default());
        assert!(result.unwrap_err().to_string().contains("unknown provider identifier"));
    }

    #[test]
    fn test_mistyped_args_are_fatal() {
        let registry = Registry::with_builtin_providers();
        let tmp = tempfile::tempdir().unwrap();
        let path = write_artifact(&tmp, &json!({"targets": []}));

        let entry = PlanEntry {
            identifier: "lines_of_code".to_string(),
            args: Some(json!({"targets": 42})),
        };
        let result = registry.run(&entry, &context(path), &History::default());
        assert!(result.unwrap_err().to_string().contains("configuration conflict"));
    }

    #[test]
    fn test_run_collects_value_and_summary() {
        let registry = Registry::with_builtin_providers();
        let tmp = tempfile::tempdir().unwrap();
        let path = write_artifact(
            &tmp,
            &json!({"targets": [
                {"name": "App.app", "executableLines": 120, "coveredLines": 60},
                {"name": "Lib.framework", "executableLines": 80, "coveredLines": 80},
            ]}),
        );

        let run = registry.run(&plan("lines_of_code"), &context(path), &History::default()).unwrap();
        assert_eq!(run.outcome.value(), Some(&MetricValue::Count(200)));
        assert_eq!(run.outcome.summary().unwrap().style, SummaryStyle::Neutral);
    }

    #[test]
    fn test_run_uses_prior_value_from_history() {
        let registry = Registry::with_builtin_providers();
        let tmp = tempfile::tempdir().unwrap();
        let path = write_artifact(&tmp, &json!({"targets": [{"name": "App.app", "executableLines": 200}]}));

        let mut history = History::default();
        let mut snapshot = Snapshot::now();
        let _ = snapshot.values.insert("lines_of_code".to_string(), MetricValue::Count(150));
        history.append(snapshot);

        let run = registry.run(&plan("lines_of_code"), &context(path), &history).unwrap();
        let summary = run.outcome.summary().unwrap();
        assert_eq!(summary.style, SummaryStyle::Improved);
        assert_eq!(summary.numeric_value, Some(50.0));
    }

    #[test]
    fn test_one_failing_provider_does_not_stop_the_others() {
        let registry = Registry::with_builtin_providers();
        let tmp = tempfile::tempdir().unwrap();
        // executableLines present, coveredLines missing: lines_of_code
        // succeeds while test_coverage fails with a malformed artifact.
        let path = write_artifact(&tmp, &json!({"targets": [{"name": "App.app", "executableLines": 120}]}));

        let plan = [plan("lines_of_code"), plan("test_coverage")];
        let runs = registry.run_all(&plan, &context(path), &History::default()).unwrap();

        assert_eq!(runs.len(), 2);
        assert!(runs[0].outcome.is_collected());
        assert!(!runs[1].outcome.is_collected());
    }
}
