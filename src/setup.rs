//! Component-specific install step.
//!
//! The install tooling handles download, build, and registration; this
//! hook prepares the data directory: subdirectories, an initial config,
//! and a check for required variables in the shared environment file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::json;

use crate::paths::ComponentPaths;

/// Variables the component expects to find in the shared env file.
/// Empty for the stub component; integrations add theirs here.
const REQUIRED_ENV_VARS: &[&str] = &[];

/// Prepare the component's data directory. Safe to run repeatedly: an
/// existing config file is never overwritten.
pub fn run(paths: &ComponentPaths) -> anyhow::Result<()> {
    tracing::info!(data_dir = %paths.data_dir().display(), "running component setup");

    let logs_dir = paths.logs_dir();
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("failed to create {}", logs_dir.display()))?;
    tracing::info!(path = %logs_dir.display(), "created logs directory");

    write_initial_config(&paths.config_path())?;
    report_missing_env_vars();

    tracing::info!("setup complete");
    Ok(())
}

/// Write the minimal initial config unless one already exists.
/// Full defaults live in the config loader, not on disk.
fn write_initial_config(config_path: &Path) -> anyhow::Result<()> {
    if config_path.exists() {
        tracing::info!(path = %config_path.display(), "config already exists, skipping");
        return Ok(());
    }

    let initial = serde_json::to_string_pretty(&json!({ "enabled": true }))
        .expect("initial config is a valid JSON literal");
    fs::write(config_path, initial)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    tracing::info!(path = %config_path.display(), "created default config");
    Ok(())
}

fn report_missing_env_vars() {
    let env_file = ComponentPaths::shared_env_file();
    let content = fs::read_to_string(&env_file).unwrap_or_default();
    for var in missing_env_vars(&content, REQUIRED_ENV_VARS) {
        tracing::warn!(var, file = %env_file.display(), "required environment variable not found");
    }
}

/// Which of `required` have no `NAME=` line in the env file content.
fn missing_env_vars<'a>(content: &str, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|var| {
            let prefix = format!("{var}=");
            !content
                .lines()
                .any(|line| line.trim_start().starts_with(&prefix))
        })
        .collect()
}
