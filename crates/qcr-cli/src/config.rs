//! Run configuration for the qcr CLI.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QCR_` prefix)
//! 3. .env files
//!
//! Command-line flags are applied on top by the caller, so the precedence
//! from highest to lowest is: flags, environment, file, defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use qcr_adapter_sim::{DEFAULT_MAX_QUBITS, DEFAULT_SEED};
use qcr_hal::{BackendConfig, DEFAULT_SHOTS};

/// Backend names the CLI can construct.
pub const KNOWN_BACKENDS: [&str; 2] = ["stub", "sim"];

/// Settings shared by every command that executes a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Backend to execute on.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Number of shots per run.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Sampling seed; the backend default is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Largest circuit the backend accepts.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_backend() -> String {
    "stub".to_string()
}

fn default_shots() -> u32 {
    DEFAULT_SHOTS
}

fn default_max_qubits() -> u32 {
    DEFAULT_MAX_QUBITS
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            shots: default_shots(),
            seed: None,
            max_qubits: default_max_qubits(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: RunConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load .env file if it exists
    /// 2. Load from file if provided
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => RunConfig::default(),
        };

        let config = config.merge_vars(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from variables returned by `lookup`.
    ///
    /// Only variables that are set override the current values.
    fn merge_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QCR_BACKEND") {
            self.backend = v;
        }
        if let Some(v) = lookup("QCR_SHOTS") {
            self.shots = parse_var("QCR_SHOTS", &v)?;
        }
        if let Some(v) = lookup("QCR_SEED") {
            self.seed = Some(parse_var("QCR_SEED", &v)?);
        }
        if let Some(v) = lookup("QCR_MAX_QUBITS") {
            self.max_qubits = parse_var("QCR_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("QCR_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(self)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, shots: Option<u32>, seed: Option<u64>) -> Self {
        if let Some(shots) = shots {
            self.shots = shots;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !KNOWN_BACKENDS.contains(&self.backend.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown backend: {} (available: {})",
                self.backend,
                KNOWN_BACKENDS.join(", ")
            )));
        }

        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        if self.max_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "max_qubits must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }

    /// Backend configuration for the selected backend.
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::new(self.backend.clone())
            .with_extra("max_qubits", serde_json::json!(self.max_qubits))
            .with_extra("seed", serde_json::json!(self.seed.unwrap_or(DEFAULT_SEED)))
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::ParseError(format!("{name}={value}: {e}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
