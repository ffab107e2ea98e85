//! Configuration management for result interpretation
//!
//! This module handles loading configuration from various sources:
//! - Configuration files (TOML format)
//! - Environment variables
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! None of these settings change what the `OperationResult` accessors
//! return. They only tighten the opt-in `validate_with` check and set up
//! logging.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// Prefix shared by all environment overrides
pub const ENV_PREFIX: &str = "OPRESULT_";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Interpretation configuration
    #[serde(default)]
    pub interpretation: InterpretationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How strictly results are validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationConfig {
    /// Report `ok` values other than 0/1/true/false as a failure of their own
    #[serde(default = "default_strict_ok")]
    pub strict_ok: bool,

    /// Treat the reply's query-failure flag as a failed operation
    #[serde(default = "default_honor_query_failure")]
    pub honor_query_failure: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_strict_ok() -> bool {
    false
}

fn default_honor_query_failure() -> bool {
    false
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

impl Default for InterpretationConfig {
    fn default() -> Self {
        Self {
            strict_ok: default_strict_ok(),
            honor_query_failure: default_honor_query_failure(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// # Arguments
    /// * `content` - TOML document
    ///
    /// # Returns
    /// * `Result<Config>` - Parsed configuration or error
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Load configuration from multiple sources with proper precedence
    ///
    /// The default configuration file is read when it exists; environment
    /// variables are applied on top.
    ///
    /// # Returns
    /// * `Result<Config>` - Merged configuration or error
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            tracing::debug!("Loading configuration from {}", path.display());
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables are prefixed with OPRESULT_
    /// Example: OPRESULT_STRICT_OK=true
    ///
    /// # Returns
    /// * `Result<Config>` - Configuration from environment or default
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, if set
    ///
    /// # Returns
    /// * `Result<()>` - Ok, or the first invalid value
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(value) = var("STRICT_OK") {
            self.interpretation.strict_ok = parse_bool("STRICT_OK", &value)?;
        }
        if let Some(value) = var("HONOR_QUERY_FAILURE") {
            self.interpretation.honor_query_failure = parse_bool("HONOR_QUERY_FAILURE", &value)?;
        }
        if let Some(value) = var("LOG_LEVEL") {
            self.logging.level = value.parse()?;
        }
        if let Some(value) = var("LOG_TIMESTAMPS") {
            self.logging.timestamps = parse_bool("LOG_TIMESTAMPS", &value)?;
        }

        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mongo-opresult")
            .join("config.toml")
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: format!("{ENV_PREFIX}{name}"),
            value: value.to_string(),
        }
        .into()),
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = crate::error::OpResultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: s.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.interpretation.strict_ok);
        assert!(!config.interpretation.honor_query_failure);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.logging.timestamps);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml_str(
            r#"
            [interpretation]
            strict_ok = true

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert!(config.interpretation.strict_ok);
        assert!(!config.interpretation.honor_query_failure);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.timestamps);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = Config::from_toml_str("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid config format"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/opresult/config.toml").unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "mongo-opresult-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[interpretation]\nhonor_query_failure = true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(config.interpretation.honor_query_failure);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(lookup(&[
                ("OPRESULT_STRICT_OK", "yes"),
                ("OPRESULT_LOG_LEVEL", "TRACE"),
                ("OPRESULT_LOG_TIMESTAMPS", "0"),
            ]))
            .unwrap();
        assert!(config.interpretation.strict_ok);
        assert!(!config.interpretation.honor_query_failure);
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert!(!config.logging.timestamps);
    }

    #[test]
    fn test_env_invalid_bool() {
        let mut config = Config::default();
        let err = config
            .apply_env(lookup(&[("OPRESULT_HONOR_QUERY_FAILURE", "maybe")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value 'maybe' for field 'OPRESULT_HONOR_QUERY_FAILURE'"
        );
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }
}
