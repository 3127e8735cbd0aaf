//! Collection runtime configuration (ember.toml)

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Smallest growth factor accepted for the queue ring buffer.
pub const MIN_GROWTH_FACTOR: f64 = 1.5;

/// Largest growth factor accepted for the queue ring buffer.
pub const MAX_GROWTH_FACTOR: f64 = 4.0;

/// Largest initial ring capacity accepted from configuration.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Top-level configuration for the collection runtime
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct CollectionsConfig {
    /// Handle registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Circular queue settings
    #[serde(default)]
    pub queue: QueueConfig,
}

/// Handle registry settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Numeric value of the first handle issued (default: 0)
    #[serde(default)]
    pub first_handle: u64,
}

/// Circular queue settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Ring capacity of a freshly created queue (default: 8)
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity when the ring is full (default: 2.0)
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
}

fn default_initial_capacity() -> usize {
    8
}

fn default_growth_factor() -> f64 {
    2.0
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            growth_factor: default_growth_factor(),
        }
    }
}

impl CollectionsConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content, path.to_path_buf())
    }

    /// Parse configuration from TOML source that did not come from a file
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Self::parse(content, PathBuf::from("<string>"))
    }

    fn parse(content: &str, file: PathBuf) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|error| ConfigError::TomlParseError { file, error })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.queue.validate()
    }
}

impl QueueConfig {
    /// Validate queue settings
    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_INITIAL_CAPACITY).contains(&self.initial_capacity) {
            return Err(ConfigError::InvalidValue {
                field: "queue.initial_capacity".to_string(),
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_INITIAL_CAPACITY, self.initial_capacity
                ),
            });
        }

        if !(MIN_GROWTH_FACTOR..=MAX_GROWTH_FACTOR).contains(&self.growth_factor) {
            return Err(ConfigError::InvalidValue {
                field: "queue.growth_factor".to_string(),
                reason: format!(
                    "must be between {} and {}, got {}",
                    MIN_GROWTH_FACTOR, MAX_GROWTH_FACTOR, self.growth_factor
                ),
            });
        }

        Ok(())
    }
}
