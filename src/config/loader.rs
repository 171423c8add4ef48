use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::ComponentConfig;

/// Errors that can occur when reading or persisting configuration.
///
/// Only `save_to` surfaces these to callers; the load path degrades to
/// defaults instead of propagating.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {source}")]
    SerializeError {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ComponentConfig {
    /// Read and parse the config file, merging its keys over defaults.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load the config file, falling back to defaults on any problem.
    ///
    /// A missing file is expected before the install step has run and is
    /// logged at warn level; a read or parse failure is logged at error
    /// level. Neither aborts the caller.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Self::default();
        }

        match Self::read_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(%err, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Persist the record to `path` as formatted JSON.
    ///
    /// Write failures propagate; the caller decides whether to exit or
    /// retry.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ComponentConfig::load_or_default(&dir.path().join("config.json"));
        assert_eq!(config, ComponentConfig::default());
    }

    #[test]
    fn invalid_json_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let config = ComponentConfig::load_or_default(&path);
        assert_eq!(config, ComponentConfig::default());
    }

    #[test]
    fn file_keys_merge_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"enabled": false, "settings": {"x": 1}}"#).unwrap();

        let config = ComponentConfig::load_or_default(&path);
        assert!(!config.enabled);
        assert_eq!(config.settings.get("x"), Some(&json!(1)));
    }

    #[test]
    fn repeated_loads_are_equal_without_modification() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"settings": {"greeting": "hello"}}"#).unwrap();

        let first = ComponentConfig::load_or_default(&path);
        let second = ComponentConfig::load_or_default(&path);
        assert_eq!(first, second);
    }

    #[test]
    fn save_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ComponentConfig::default();
        config.enabled = false;
        config.settings.insert("x".into(), json!(1));
        config.save_to(&path).unwrap();

        let reread = ComponentConfig::read_from(&path).unwrap();
        assert_eq!(reread, config);
    }

    #[test]
    fn save_to_unwritable_path_propagates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("config.json");

        let result = ComponentConfig::default().save_to(&path);
        assert!(matches!(result, Err(ConfigError::WriteError { .. })));
    }
}
