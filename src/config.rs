//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Backend URL variables, highest priority first
const BACKEND_URL_VARS: [&str; 2] = ["GTM_BACKEND_URL", "REACT_APP_BACKEND_URL"];

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// The first candidate file that loads wins. Files that exist but fail
    /// to load are skipped and returned alongside the config, so the caller
    /// can report them once logging is up.
    pub fn load_default() -> (Self, Vec<ConfigError>) {
        Self::load_first(&Self::default_paths(), |key| std::env::var(key).ok())
    }

    fn load_first<F>(paths: &[PathBuf], lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut skipped = Vec::new();
        let mut config = paths
            .iter()
            .filter(|path| path.exists())
            .find_map(|path| match Self::load(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    skipped.push(e);
                    None
                }
            })
            .unwrap_or_default();

        config.apply_overrides(lookup);
        (config, skipped)
    }

    /// Candidate config files, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("gtm-portfolio").join("config.toml")),
            Some(PathBuf::from("./gtm-portfolio.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = BACKEND_URL_VARS
            .into_iter()
            .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        {
            self.api.base_url = url;
        }

        if let Some(level) = lookup("GTM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("GTM_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# GTM Portfolio Configuration
#
# Environment variables override these settings:
# - GTM_BACKEND_URL (or REACT_APP_BACKEND_URL)
# - GTM_LOG_LEVEL
# - GTM_LOG_FORMAT

[api]
# Backend base URL; requests go to <base_url>/api/...
base_url = "{}"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for terminals) or json
format = "pretty"
"#,
        DEFAULT_BASE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8001");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://gtm.example.com\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://gtm.example.com");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[api\nbase_url = 1").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_first_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("config.toml");
        std::fs::write(&bad, "[api\nbase_url = 1").unwrap();
        let good = dir.path().join("gtm-portfolio.toml");
        std::fs::write(&good, "[logging]\nlevel = \"debug\"").unwrap();
        let absent = dir.path().join("absent.toml");

        let (config, skipped) =
            Config::load_first(&[absent.clone(), bad.clone(), good], lookup(&[]));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(skipped.len(), 1);
        assert!(matches!(&skipped[0], ConfigError::Parse { path, .. } if *path == bad));

        let (config, skipped) = Config::load_first(&[bad, absent], lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn test_load_first_applies_overrides() {
        let (config, skipped) = Config::load_first(
            &[],
            lookup(&[("GTM_BACKEND_URL", "http://primary:9000")]),
        );
        assert!(skipped.is_empty());
        assert_eq!(config.api.base_url, "http://primary:9000");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("REACT_APP_BACKEND_URL", "http://legacy:8001"),
            ("GTM_LOG_FORMAT", "json"),
        ]));
        assert_eq!(config.api.base_url, "http://legacy:8001");
        assert!(config.logging.is_json());

        config.apply_overrides(lookup(&[
            ("GTM_BACKEND_URL", "http://primary:9000"),
            ("REACT_APP_BACKEND_URL", "http://legacy:8001"),
            ("GTM_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.api.base_url, "http://primary:9000");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_blank_backend_url_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("GTM_BACKEND_URL", "  ")]));
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }
}
