//! Ember Configuration System
//!
//! Provides configuration for the handle-indexed collection runtime:
//! - Registry settings (handle numbering)
//! - Queue settings (initial ring capacity, growth factor)
//! - Environment overrides
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Project config (./ember.toml, searched upward from the start directory)
//! 3. Environment variables (EMBER_*)
//!
//! # Example
//!
//! ```no_run
//! use ember_config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! ```

pub mod collections;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// File name searched for by [`ConfigLoader`]
pub const CONFIG_FILE_NAME: &str = "ember.toml";

// Re-export main types
pub use collections::{CollectionsConfig, QueueConfig, RegistryConfig};
pub use loader::ConfigLoader;
