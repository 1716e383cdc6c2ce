use super::Host;
use super::config::Config;
use crate::Result;
use crate::providers::Registry;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `buildtrend.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Validates a configuration file by loading it and checking its run plan
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or parsed, or if the
/// run plan names unknown providers, repeats a provider, or carries
/// arguments its provider cannot decode
fn validate_config_inner(base: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<()> {
    let config = Config::load(base, config_path)?;
    config.validate_plan(&Registry::with_builtin_providers())
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let base = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(&base, config_path) {
        Ok(()) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::{InitArgs, init_config};

    /// Test host that captures output to in-memory buffers. The writers
    /// append, so commands that write output in several calls keep every
    /// line.
    struct TestHost {
        output_buf: Vec<u8>,
        error_buf: Vec<u8>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                output_buf: Vec::new(),
                error_buf: Vec::new(),
            }
        }
    }

    impl Host for TestHost {
        fn output(&mut self) -> impl Write {
            &mut self.output_buf
        }

        fn error(&mut self) -> impl Write {
            &mut self.error_buf
        }

        fn exit(&mut self, _code: i32) {
            // In tests, don't actually exit
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().join("buildtrend.toml")).unwrap();

        let mut init_host = TestHost::new();
        let init_args = InitArgs {
            output: config_path.clone(),
        };
        init_config(&mut init_host, &init_args).expect("init_config should succeed");

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config(&mut host, &args);

        assert!(result.is_ok(), "Default configuration should validate successfully: {result:?}");

        // Both output lines must survive the two separate writes.
        let output = String::from_utf8_lossy(&host.output_buf).into_owned();
        assert!(output.contains("Configuration file is valid"), "got: {output}");
        assert!(output.contains("Config file:"), "got: {output}");
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().join("invalid_syntax.toml")).unwrap();

        std::fs::write(
            &config_path,
            r#"
# Missing closing bracket
[[provider]
id = "lines_of_code"
"#,
        )
        .unwrap();

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config(&mut host, &args);

        assert!(result.is_err(), "Invalid TOML syntax should fail validation");
        assert!(String::from_utf8_lossy(&host.error_buf).contains("Configuration validation failed"));
    }

    #[test]
    fn test_unknown_provider_fails_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().join("unknown_provider.toml")).unwrap();

        std::fs::write(&config_path, "[[provider]]\nid = \"binary_size\"\n").unwrap();

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config(&mut host, &args);

        assert!(result.is_err(), "Unknown provider should fail validation");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().join("empty.toml")).unwrap();

        std::fs::write(&config_path, "# Empty config file\n").unwrap();

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config(&mut host, &args);

        assert!(result.is_ok(), "Empty config should be valid (uses defaults)");
    }
}
