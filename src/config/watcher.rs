//! Hot reload of the component configuration file.
//!
//! Change events are debounced on a background thread; each surviving
//! event reloads the store and pushes the fresh record over a channel to
//! the owning loop.

use std::ffi::OsString;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::config::store::ConfigStore;
use crate::config::types::ComponentConfig;

/// Errors that can occur while establishing file observation.
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("failed to create file watcher: {0}")]
    Init(#[from] notify::Error),

    #[error("config path has no parent directory")]
    NoParentDir,
}

/// Observes the config file and notifies with freshly loaded records.
///
/// The parent directory is watched rather than the file itself, so a
/// config file that is deleted and recreated, or that only appears after
/// startup, is still picked up. Dropping the watcher deterministically
/// stops future notifications; at most one observation should be held at
/// a time, replacement being done by dropping the old one.
pub struct ConfigWatcher {
    // Dropping the notify backend closes the raw event channel, which in
    // turn shuts the debounce thread down.
    _watcher: RecommendedWatcher,
    _debounce: thread::JoinHandle<()>,
}

impl ConfigWatcher {
    /// Start observing the store's config file.
    ///
    /// Each debounced change event reloads the store and sends the new
    /// record over `updates`. The watcher stops on its own once the
    /// receiving side of `updates` goes away.
    ///
    /// # Errors
    /// Fails if the notify backend cannot be initialized or the config
    /// path has no parent directory to observe.
    pub fn start(
        store: ConfigStore,
        updates: Sender<ComponentConfig>,
        debounce_ms: u64,
    ) -> Result<Self, WatcherError> {
        let config_path = store.path().to_path_buf();
        let watch_dir = config_path
            .parent()
            .ok_or(WatcherError::NoParentDir)?
            .to_path_buf();
        let file_name = config_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        let (raw_tx, raw_rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                if let Ok(event) = result {
                    let _ = raw_tx.send(event);
                }
            },
            notify::Config::default(),
        )?;
        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        let debounce = thread::spawn(move || {
            debounce_loop(raw_rx, store, updates, file_name, debounce_ms);
        });

        Ok(Self {
            _watcher: watcher,
            _debounce: debounce,
        })
    }
}

/// Collapse bursts of raw filesystem events into single reloads.
///
/// A reload fires only after `debounce_ms` of quiet following the last
/// event that touched the config file.
fn debounce_loop(
    raw: mpsc::Receiver<Event>,
    store: ConfigStore,
    updates: Sender<ComponentConfig>,
    file_name: OsString,
    debounce_ms: u64,
) {
    let debounce = Duration::from_millis(debounce_ms);
    let mut pending: Option<Instant> = None;

    loop {
        let timeout = if pending.is_some() {
            debounce
        } else {
            Duration::from_secs(60)
        };

        match raw.recv_timeout(timeout) {
            Ok(event) => {
                if touches_config(&event, &file_name) {
                    pending = Some(Instant::now());
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(last) = pending {
                    if last.elapsed() >= debounce {
                        tracing::info!("config file changed, reloading");
                        let config = store.reload();
                        if updates.send(config).is_err() {
                            break;
                        }
                        pending = None;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Whether a notify event affects the config file itself.
fn touches_config(event: &Event, file_name: &OsString) -> bool {
    if !matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) {
        return false;
    }

    event
        .paths
        .iter()
        .any(|p| p.file_name().map(|n| n == file_name.as_os_str()).unwrap_or(false))
}
