//! Authoritative in-memory configuration record.
//!
//! One store is constructed per process and cloned into whichever part of
//! the process needs configuration access. Consumers only ever receive
//! snapshots; the record behind the lock is replaced wholesale on reload
//! or save.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::config::loader::ConfigError;
use crate::config::types::ComponentConfig;

/// Shared config container with interior mutability.
///
/// Cloning the store is cheap and shares the same underlying record, so
/// the watcher thread's reloads are visible to every holder.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<ComponentConfig>>,
    path: PathBuf,
}

impl ConfigStore {
    /// Create the store by performing the first load of the config file.
    ///
    /// Never fails: a missing or malformed file yields the default record
    /// (see [`ComponentConfig::load_or_default`]).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = ComponentConfig::load_or_default(&path);
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Get a snapshot of the current record.
    pub fn get(&self) -> ComponentConfig {
        self.inner.read().expect("config lock poisoned").clone()
    }

    /// Re-read the config file and replace the current record.
    ///
    /// Returns the newly loaded record. Same degrade-to-defaults policy
    /// as the initial load.
    pub fn reload(&self) -> ComponentConfig {
        let config = ComponentConfig::load_or_default(&self.path);
        let mut guard = self.inner.write().expect("config lock poisoned");
        *guard = config.clone();
        config
    }

    /// Persist `config` to the config file and make it the current record.
    ///
    /// The record is stored exactly as given; defaults are not re-applied.
    /// Write failures propagate and leave the in-memory record unchanged.
    pub fn save(&self, config: &ComponentConfig) -> Result<(), ConfigError> {
        config.save_to(&self.path)?;
        let mut guard = self.inner.write().expect("config lock poisoned");
        *guard = config.clone();
        Ok(())
    }

    /// Path of the config file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::load(dir.path().join("config.json"));
        assert_eq!(store.get(), ComponentConfig::default());
    }

    #[test]
    fn reload_picks_up_new_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"enabled": true}"#).unwrap();

        let store = ConfigStore::load(&path);
        assert!(store.get().enabled);

        fs::write(&path, r#"{"enabled": false}"#).unwrap();
        let reloaded = store.reload();
        assert!(!reloaded.enabled);
        assert_eq!(store.get(), reloaded);
    }

    #[test]
    fn save_replaces_record_without_remerging() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::load(dir.path().join("config.json"));

        let mut config = ComponentConfig::default();
        config.enabled = false;
        config.settings.insert("x".into(), json!(1));
        store.save(&config).unwrap();

        assert_eq!(store.get(), config);
        // The file now holds the saved record verbatim.
        assert_eq!(ComponentConfig::read_from(store.path()).unwrap(), config);
    }

    #[test]
    fn failed_save_keeps_old_record() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::load(dir.path().join("missing").join("config.json"));
        let before = store.get();

        let mut config = ComponentConfig::default();
        config.enabled = false;
        assert!(store.save(&config).is_err());
        assert_eq!(store.get(), before);
    }
}
