use crate::Result;
use crate::providers::{PlanEntry, Registry};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// One provider selection in the run plan, in run order.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Identifier of the provider to run
    pub id: String,

    /// Provider-specific arguments, decoded by the provider itself
    #[serde(default)]
    pub args: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the build/test artifact (a coverage report in JSON form)
    #[serde(default = "default_artifact")]
    pub artifact: Utf8PathBuf,

    /// Path to the history file holding past metric snapshots
    #[serde(default = "default_history")]
    pub history: Utf8PathBuf,

    /// Providers to run, in order
    #[serde(default)]
    pub provider: Vec<ProviderConfig>,
}

fn default_artifact() -> Utf8PathBuf {
    Utf8PathBuf::from("coverage-report.json")
}

fn default_history() -> Utf8PathBuf {
    Utf8PathBuf::from(".buildtrend/history.json")
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit path must exist; with no explicit path, `buildtrend.toml`
    /// under the base directory is used when present and the embedded
    /// defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading buildtrend configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base.join("buildtrend.toml");
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading buildtrend configuration file '{path}'")),
            }
        };

        toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The run plan described by this configuration.
    #[must_use]
    pub fn plan(&self) -> Vec<PlanEntry> {
        self.provider
            .iter()
            .map(|provider| PlanEntry {
                identifier: provider.id.clone(),
                args: provider.args.clone(),
            })
            .collect()
    }

    /// Check the run plan against a registry: every identifier must be
    /// registered and unique within the plan, and every argument table must
    /// decode for its provider.
    ///
    /// # Errors
    ///
    /// Returns a configuration-conflict error describing the first problem.
    pub fn validate_plan(&self, registry: &Registry) -> Result<()> {
        let mut seen = BTreeSet::new();

        for entry in &self.provider {
            let id = entry.id.as_str();
            if !seen.insert(id) {
                return Err(app_err!("configuration conflict: provider '{id}' is listed more than once"));
            }

            let provider = registry
                .get(id)
                .ok_or_else(|| app_err!("configuration conflict: unknown provider identifier '{id}'"))?;
            provider.check_args(entry.args.as_ref())?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = Config::default();
        assert_eq!(config.artifact, Utf8PathBuf::from("coverage-report.json"));
        assert_eq!(config.history, Utf8PathBuf::from(".buildtrend/history.json"));
        assert_eq!(config.provider.len(), 2);
        assert_eq!(config.provider[0].id, "lines_of_code");
        assert_eq!(config.provider[1].id, "test_coverage");
    }

    #[test]
    fn test_default_plan_validates_against_builtin_registry() {
        let config = Config::default();
        config.validate_plan(&Registry::with_builtin_providers()).unwrap();
    }

    #[test]
    fn test_paths_deserialize_from_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("buildtrend.toml");
        std::fs::write(&path, "artifact = \"build/cov.json\"\nhistory = \"ci/history.json\"\n").unwrap();

        let config = Config::load(&base, Some(&path)).unwrap();
        assert_eq!(config.artifact, Utf8PathBuf::from("build/cov.json"));
        assert_eq!(config.history, Utf8PathBuf::from("ci/history.json"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let config = Config::load(&base, None).unwrap();
        assert_eq!(config.provider.len(), 2);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("nope.toml");
        assert!(Config::load(&base, Some(&path)).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("buildtrend.toml");
        std::fs::write(&path, "artifact = \"a.json\"\nunknown_field = 1\n").unwrap();
        assert!(Config::load(&base, Some(&path)).is_err());
    }

    #[test]
    fn test_provider_args_carry_through_as_json() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("buildtrend.toml");
        std::fs::write(
            &path,
            "[[provider]]\nid = \"lines_of_code\"\n[provider.args]\ntargets = [\"App\"]\n",
        )
        .unwrap();

        let config = Config::load(&base, Some(&path)).unwrap();
        let plan = config.plan();
        assert_eq!(plan[0].identifier, "lines_of_code");
        assert_eq!(plan[0].args.as_ref().unwrap()["targets"][0], "App");
    }

    #[test]
    fn test_duplicate_plan_entry_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("buildtrend.toml");
        std::fs::write(&path, "[[provider]]\nid = \"lines_of_code\"\n\n[[provider]]\nid = \"lines_of_code\"\n").unwrap();

        let config = Config::load(&base, Some(&path)).unwrap();
        let result = config.validate_plan(&Registry::with_builtin_providers());
        assert!(result.unwrap_err().to_string().contains("listed more than once"));
    }

    #[test]
    fn test_unknown_plan_entry_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("buildtrend.toml");
        std::fs::write(&path, "[[provider]]\nid = \"binary_size\"\n").unwrap();

        let config = Config::load(&base, Some(&path)).unwrap();
        let result = config.validate_plan(&Registry::with_builtin_providers());
        assert!(result.unwrap_err().to_string().contains("unknown provider identifier"));
    }

    #[test]
    fn test_mistyped_args_fail_plan_validation() {
        let tmp = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let path = base.join("buildtrend.toml");
        std::fs::write(&path, "[[provider]]\nid = \"lines_of_code\"\n[provider.args]\ntargets = \"App\"\n").unwrap();

        let config = Config::load(&base, Some(&path)).unwrap();
        let result = config.validate_plan(&Registry::with_builtin_providers());
        assert!(result.unwrap_err().to_string().contains("configuration conflict"));
    }
}
