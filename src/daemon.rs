//! Long-running service entry point.
//!
//! The daemon owns the config store and watcher. Its loop services two
//! inputs only: reloaded configuration records and termination signals.
//! Component business logic is deliberately absent here — this crate
//! ships the lifecycle, not a transport.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use signal_hook::consts::signal::{SIGINT, SIGTERM};

use crate::config::{ConfigStore, ConfigWatcher};
use crate::paths::ComponentPaths;
use crate::COMPONENT_NAME;

/// Quiet window before a burst of file events becomes one reload.
const RELOAD_DEBOUNCE_MS: u64 = 200;

/// How often the loop wakes to poll the termination flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

/// Run the component service until disabled or signalled.
pub fn run(paths: &ComponentPaths) -> anyhow::Result<()> {
    tracing::info!(component = COMPONENT_NAME, "starting");
    tracing::info!(data_dir = %paths.data_dir().display(), "data directory");

    let store = ConfigStore::load(paths.config_path());
    let config = store.get();
    tracing::info!(enabled = config.enabled, "configuration loaded");

    if !config.enabled {
        tracing::info!("component disabled in config, exiting");
        return Ok(());
    }

    let term = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&term))
        .context("failed to register SIGINT handler")?;
    signal_hook::flag::register(SIGTERM, Arc::clone(&term))
        .context("failed to register SIGTERM handler")?;

    let (updates_tx, updates_rx) = mpsc::channel();
    let _watcher = match ConfigWatcher::start(store.clone(), updates_tx, RELOAD_DEBOUNCE_MS) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            tracing::warn!(%err, "config watcher unavailable, hot reload disabled");
            None
        }
    };

    tracing::info!("running");

    loop {
        if term.load(Ordering::Relaxed) {
            tracing::info!("shutdown signal received");
            break;
        }

        match updates_rx.recv_timeout(SHUTDOWN_POLL) {
            Ok(config) => {
                tracing::info!(enabled = config.enabled, "configuration reloaded");
                if !config.enabled {
                    tracing::info!("component disabled, stopping");
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // No watcher; only signals can end the loop now.
                thread::sleep(SHUTDOWN_POLL);
            }
        }
    }

    tracing::info!("shutdown complete");
    Ok(())
}
