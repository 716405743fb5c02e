//! Configuration file loading and parsing.

use crate::types::IchdlConfig;
use chrono::format::{Item, StrftimeItems};
use ichdl_common_fs::{path as fs_path, FsError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

const CONFIG_FILE: &str = "config.yaml";
const MAX_CONFIG_SIZE: usize = 1024 * 1024;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Create a loader rooted at the nearest project directory above `start`,
    /// or at `start` itself when no project marker is found.
    pub fn discover(start: impl AsRef<Path>) -> Self {
        let start = start.as_ref();
        Self::new(fs_path::find_project_root(start).unwrap_or_else(|| start.to_path_buf()))
    }

    /// Project directory the loader resolves against.
    pub fn project_dir(&self) -> &Path {
        &self.base_path
    }

    /// Path of `.ichdl/config.yaml` under the project directory.
    pub fn config_path(&self) -> PathBuf {
        fs_path::config_dir(&self.base_path).join(CONFIG_FILE)
    }

    /// Load configuration from `.ichdl/config.yaml`, falling back to defaults
    /// when the file does not exist.
    pub fn load(&self) -> Result<IchdlConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(IchdlConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load an explicit config file. A missing file is an error.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<IchdlConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = ichdl_common_fs::read_to_string(path, MAX_CONFIG_SIZE)?;
        let config = self.parse(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn parse(&self, contents: &str) -> Result<IchdlConfig, ConfigError> {
        let expanded = self.expand_env_vars(contents)?;

        // An empty or comment-only file deserializes to null.
        if expanded.trim().lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(IchdlConfig::default());
        }

        let config: IchdlConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Resolve a config-relative path against the project directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is valid")
        });

        let mut missing = None;
        let result = re.replace_all(content, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match cap.get(2) {
                    Some(d) => d.as_str().to_string(),
                    None => {
                        missing.get_or_insert_with(|| var_name.to_string());
                        String::new()
                    }
                },
            }
        });

        match missing {
            Some(var) => Err(ConfigError::EnvVarNotFound { var }),
            None => Ok(result.into_owned()),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self, config: &IchdlConfig) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::ValidationError {
            message: message.to_string(),
        };

        let language = config.generation.default_language.to_ascii_lowercase();
        if language != "verilog" && language != "vhdl" {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "generation.default_language must be 'verilog' or 'vhdl', got '{}'",
                    config.generation.default_language
                ),
            });
        }

        let format = &config.generation.timestamp_format;
        if format.is_empty() || StrftimeItems::new(format).any(|i| matches!(i, Item::Error)) {
            return Err(ConfigError::ValidationError {
                message: format!("generation.timestamp_format is not a valid format: '{format}'"),
            });
        }

        for (name, dir) in [
            ("output.verilog_dir", &config.output.verilog_dir),
            ("output.vhdl_dir", &config.output.vhdl_dir),
            ("output.testbench_dir", &config.output.testbench_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("{name} must not be empty"),
                });
            }
        }

        if !(0.0..=100.0).contains(&config.defaults.coverage_target) {
            return Err(invalid("defaults.coverage_target must be between 0 and 100"));
        }

        if config.defaults.min_test_vectors == 0 {
            return Err(invalid("defaults.min_test_vectors must be greater than 0"));
        }

        if config.defaults.simulation_duration_ns == 0 {
            return Err(invalid("defaults.simulation_duration_ns must be greater than 0"));
        }

        Ok(())
    }

}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) {
        let ichdl_dir = dir.join(".ichdl");
        fs::create_dir_all(&ichdl_dir).unwrap();
        fs::write(ichdl_dir.join("config.yaml"), content).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.generation.default_language, "verilog");
        assert!(config.paths.metadata.is_none());
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
paths:
  metadata: Ic_Metadata_Master.json
  templates: templates
output:
  verilog_dir: out/v
generation:
  default_language: vhdl
  fallback: true
defaults:
  min_test_vectors: 16
"#,
        );

        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();

        assert_eq!(
            config.paths.metadata,
            Some(PathBuf::from("Ic_Metadata_Master.json"))
        );
        assert_eq!(config.paths.templates, Some(PathBuf::from("templates")));
        assert_eq!(config.output.verilog_dir, PathBuf::from("out/v"));
        assert_eq!(config.generation.default_language, "vhdl");
        assert!(config.generation.fallback);
        assert_eq!(config.defaults.min_test_vectors, 16);

        // Unspecified values keep their defaults
        assert_eq!(config.output.vhdl_dir, PathBuf::from("generated_vhdl"));
        assert_eq!(config.defaults.simulation_duration_ns, 1000);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "# nothing here\n\n");
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.output.testbench_dir, PathBuf::from("generated_testbenches"));
    }

    #[test]
    fn test_load_file_missing_is_error() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let result = loader.load_file(dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("ICHDL_TEST_VAR", "test_value");
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${ICHDL_TEST_VAR}").unwrap();
        assert_eq!(result, "key: test_value");
        std::env::remove_var("ICHDL_TEST_VAR");
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("key: ${ICHDL_NONEXISTENT:-default}")
            .unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        match loader.expand_env_vars("key: ${ICHDL_MISSING_VAR}").unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "ICHDL_MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_env_vars_in_single_value() {
        std::env::set_var("ICHDL_PREFIX", "out");
        std::env::set_var("ICHDL_SUFFIX", "verilog");

        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("dir: ${ICHDL_PREFIX}/${ICHDL_SUFFIX}")
            .unwrap();
        assert_eq!(result, "dir: out/verilog");

        std::env::remove_var("ICHDL_PREFIX");
        std::env::remove_var("ICHDL_SUFFIX");
    }

    #[test]
    fn test_validation_errors() {
        let loader = ConfigLoader::new(".");

        let mut config = IchdlConfig::default();
        config.generation.default_language = "systemc".to_string();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => {
                assert!(message.contains("default_language"))
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = IchdlConfig::default();
        config.defaults.coverage_target = 120.0;
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => {
                assert!(message.contains("coverage_target"))
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = IchdlConfig::default();
        config.defaults.min_test_vectors = 0;
        assert!(loader.validate(&config).is_err());

        let mut config = IchdlConfig::default();
        config.generation.timestamp_format = "%Y-%Q".to_string();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => {
                assert!(message.contains("timestamp_format"))
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let mut config = IchdlConfig::default();
        config.generation.default_language = "VHDL".to_string();
        assert!(loader.validate(&config).is_ok());
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
paths:
  metadata: x.json
  templates: [unclosed
"#,
        );

        match ConfigLoader::new(dir.path()).load().unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_relative_to_project() {
        let loader = ConfigLoader::new("/work/project");
        assert_eq!(
            loader.resolve("templates"),
            PathBuf::from("/work/project/templates")
        );
        assert_eq!(loader.resolve("/abs/meta.json"), PathBuf::from("/abs/meta.json"));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "generation:\n  fallback: true\n");
        let nested = dir.path().join("sub/dir");
        fs::create_dir_all(&nested).unwrap();

        let loader = ConfigLoader::discover(&nested);
        assert_eq!(loader.project_dir(), dir.path());
        assert!(loader.load().unwrap().generation.fallback);
    }
}
