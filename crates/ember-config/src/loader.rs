//! Configuration Loader
//!
//! Handles locating ember.toml and applying environment overrides on top of it.

use crate::collections::CollectionsConfig;
use crate::{ConfigError, ConfigResult, CONFIG_FILE_NAME};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration with the following precedence:
/// 1. Built-in defaults - lowest priority
/// 2. Project config (ember.toml) - overrides defaults
/// 3. Environment variables (EMBER_*) - overrides project
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Skip EMBER_* overrides (used by embedders that manage their own env)
    ignore_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { ignore_env: false }
    }

    /// Create a loader that never reads EMBER_* variables
    pub fn without_env() -> Self {
        Self { ignore_env: true }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find ember.toml. Falls back to defaults
    /// when no file is found.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<CollectionsConfig> {
        let config = match Self::find_config_file(start_dir) {
            Some(path) => CollectionsConfig::load_from_file(&path)?,
            None => CollectionsConfig::default(),
        };
        self.finish(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<CollectionsConfig> {
        let config = CollectionsConfig::load_from_file(config_path)?;
        self.finish(config)
    }

    /// Find ember.toml by walking up the directory tree
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }

    fn finish(&self, config: CollectionsConfig) -> ConfigResult<CollectionsConfig> {
        let config = if self.ignore_env {
            config
        } else {
            apply_env_overrides(config)?
        };
        config.validate()?;
        Ok(config)
    }
}

/// Apply environment variable overrides
///
/// Recognized variables: EMBER_FIRST_HANDLE, EMBER_QUEUE_INITIAL_CAPACITY,
/// EMBER_QUEUE_GROWTH_FACTOR.
fn apply_env_overrides(mut config: CollectionsConfig) -> ConfigResult<CollectionsConfig> {
    if let Ok(raw) = env::var("EMBER_FIRST_HANDLE") {
        config.registry.first_handle = parse_env("EMBER_FIRST_HANDLE", &raw)?;
    }

    if let Ok(raw) = env::var("EMBER_QUEUE_INITIAL_CAPACITY") {
        config.queue.initial_capacity = parse_env("EMBER_QUEUE_INITIAL_CAPACITY", &raw)?;
    }

    if let Ok(raw) = env::var("EMBER_QUEUE_GROWTH_FACTOR") {
        config.queue.growth_factor = parse_env("EMBER_QUEUE_GROWTH_FACTOR", &raw)?;
    }

    Ok(config)
}

fn parse_env<T>(var: &str, raw: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        field: var.to_string(),
        reason: format!("cannot parse '{}': {}", raw, e),
    })
}
