//! Hot reload of the configuration file.
//!
//! Watches the directory holding the config file (editors often replace the
//! file rather than write it in place). Events for the file are collapsed
//! into at most one [`ConfigStore::reload`] per 200ms tick.

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::config_store::ConfigStore;

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watcher that feeds config file changes into a [`ConfigStore`].
pub struct ConfigWatcher {
    /// Handle to the watcher (kept alive)
    _watcher: Option<RecommendedWatcher>,
    active: bool,
}

impl ConfigWatcher {
    /// Start watching the file behind `store`. Failures leave hot reload
    /// disabled.
    pub fn new(store: Arc<ConfigStore>) -> Self {
        let path = store.path().to_path_buf();
        let (Some(dir), Some(file_name)) = (watch_dir(&path), path.file_name()) else {
            tracing::debug!(path = %path.display(), "Config path has no file name, hot reload disabled");
            return Self::inactive();
        };
        if !dir.exists() {
            tracing::debug!(path = %dir.display(), "Config directory does not exist");
            return Self::inactive();
        }

        match Self::start_watcher(&dir, file_name.to_os_string(), store) {
            Ok(watcher) => {
                tracing::info!(path = %path.display(), "Config watcher started");
                Self {
                    _watcher: Some(watcher),
                    active: true,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start config watcher");
                Self::inactive()
            }
        }
    }

    fn inactive() -> Self {
        Self {
            _watcher: None,
            active: false,
        }
    }

    fn start_watcher(
        dir: &Path,
        file_name: OsString,
        store: Arc<ConfigStore>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        let (tx, mut rx) = mpsc::channel::<PathBuf>(100);

        tokio::spawn(async move {
            let pending = Arc::new(AtomicBool::new(false));
            let pending_clone = pending.clone();

            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(DEBOUNCE).await;
                    if pending_clone.swap(false, Ordering::AcqRel) {
                        tracing::debug!("Config file changed (debounced)");
                        let _ = store.reload().await;
                    }
                }
            });

            while rx.recv().await.is_some() {
                pending.store(true, Ordering::Release);
            }
        });

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        if path.file_name() == Some(file_name.as_os_str()) {
                            let _ = tx.blocking_send(path);
                        }
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

fn watch_dir(path: &Path) -> Option<PathBuf> {
    match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Some(PathBuf::from(".")),
        Some(p) => Some(p.to_path_buf()),
        None => None,
    }
}
