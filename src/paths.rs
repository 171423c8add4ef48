//! Per-component filesystem locations.
//!
//! Every component owns a data directory under `~/zylos/components/<name>/`
//! holding its `config.json` and `logs/`. The shared environment file lives
//! at `~/zylos/.env` and is consumed, never managed, by this crate.

use std::path::{Path, PathBuf};

/// Resolved filesystem locations for one component.
#[derive(Debug, Clone)]
pub struct ComponentPaths {
    data_dir: PathBuf,
}

impl ComponentPaths {
    /// Resolve the data directory for `component` under the user's home.
    ///
    /// Falls back to the current directory if the home directory cannot
    /// be determined.
    pub fn resolve(component: &str) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: home.join("zylos").join("components").join(component),
        }
    }

    /// Use an explicit data directory instead of the home-based default.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Location of the environment file shared by all components.
    pub fn shared_env_file() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join("zylos").join(".env")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_component_name() {
        let paths = ComponentPaths::resolve("telegram");
        assert!(paths.data_dir().ends_with("zylos/components/telegram"));
    }

    #[test]
    fn config_and_logs_live_under_data_dir() {
        let paths = ComponentPaths::at("/tmp/component");
        assert_eq!(paths.config_path(), Path::new("/tmp/component/config.json"));
        assert_eq!(paths.logs_dir(), Path::new("/tmp/component/logs"));
    }

    #[test]
    fn shared_env_file_ends_with_expected() {
        assert!(ComponentPaths::shared_env_file().ends_with("zylos/.env"));
    }
}
