//! Index configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```json
//! {
//!   "leaf_capacity": 8,
//!   "max_depth": 64,
//!   "max_labels": 100000000,
//!   "require_unique_ids": true,
//!   "log_level": "info"
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Configuration error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    /// Config file missing or unreadable
    ConfigUnreadable,
    /// Config file is not valid JSON or a value is out of range
    ConfigInvalid,
}

impl ConfigErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigUnreadable => "ELIM_CONFIG_UNREADABLE",
            Self::ConfigInvalid => "ELIM_CONFIG_INVALID",
        }
    }
}

/// Configuration error
#[derive(Debug, Clone)]
pub struct ConfigError {
    code: ConfigErrorCode,
    message: String,
}

impl ConfigError {
    /// Config file could not be read
    pub fn unreadable(msg: impl Into<String>) -> Self {
        Self {
            code: ConfigErrorCode::ConfigUnreadable,
            message: msg.into(),
        }
    }

    /// Config content rejected
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self {
            code: ConfigErrorCode::ConfigInvalid,
            message: msg.into(),
        }
    }

    pub fn code(&self) -> ConfigErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Config result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Build limits and logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum number of labels in a regular leaf
    #[serde(default = "default_leaf_capacity")]
    pub leaf_capacity: usize,

    /// Depth at which partitioning stops and the rest goes into one leaf
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Largest label set an index may be built from
    #[serde(default = "default_max_labels")]
    pub max_labels: usize,

    /// Reject label sets with repeated ids
    #[serde(default = "default_require_unique_ids")]
    pub require_unique_ids: bool,

    /// Lowest log severity written (trace, info, warn, error, fatal)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_leaf_capacity() -> usize {
    8
}
fn default_max_depth() -> usize {
    64
}
fn default_max_labels() -> usize {
    100_000_000
}
fn default_require_unique_ids() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            leaf_capacity: default_leaf_capacity(),
            max_depth: default_max_depth(),
            max_labels: default_max_labels(),
            require_unique_ids: default_require_unique_ids(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::unreadable(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_json(&content)?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", path.display().to_string().as_str())],
        );

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| ConfigError::invalid(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.leaf_capacity == 0 {
            return Err(ConfigError::invalid("leaf_capacity must be > 0"));
        }

        if self.max_depth == 0 {
            return Err(ConfigError::invalid("max_depth must be > 0"));
        }

        if self.max_labels == 0 {
            return Err(ConfigError::invalid("max_labels must be > 0"));
        }

        self.severity()?;

        Ok(())
    }

    /// The configured log threshold
    pub fn severity(&self) -> ConfigResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            ConfigError::invalid(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn, error or fatal.",
                self.log_level
            ))
        })
    }

    /// Install the configured log threshold process-wide
    pub fn apply_logging(&self) -> ConfigResult<()> {
        Logger::set_min_severity(self.severity()?);
        Ok(())
    }
}
