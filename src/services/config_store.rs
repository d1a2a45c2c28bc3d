//! Live configuration.
//!
//! Readers take an `Arc<AppConfig>` snapshot and keep it for the whole
//! request. Updates and reloads swap the snapshot atomically; a rejected
//! change leaves the previous one in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{AppConfig, ConfigError, SettingsUpdate};

pub struct ConfigStore {
    path: PathBuf,
    current: RwLock<Arc<AppConfig>>,
}

impl ConfigStore {
    /// Load `path`, creating it with defaults when missing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = AppConfig::load_or_create(&path);
        Self::with_config(path, config)
    }

    /// Store serving `config`, persisting changes to `path`.
    pub fn with_config(path: impl Into<PathBuf>, config: AppConfig) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Arc::new(config)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn snapshot(&self) -> Arc<AppConfig> {
        self.current.read().await.clone()
    }

    /// Re-read the file. On failure the active configuration is kept.
    pub async fn reload(&self) -> Result<Arc<AppConfig>, ConfigError> {
        match AppConfig::load(&self.path) {
            Ok(config) => {
                let config = Arc::new(config);
                *self.current.write().await = config.clone();
                tracing::info!(album = %config.immich.album, "Configuration reloaded");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Config reload rejected, keeping previous");
                Err(e)
            }
        }
    }

    /// Apply a partial update: validate, persist, then swap.
    pub async fn update(&self, update: SettingsUpdate) -> Result<Arc<AppConfig>, ConfigError> {
        let mut current = self.current.write().await;
        let next = AppConfig {
            immich: current.immich.merged(update),
        };
        next.immich.validate()?;
        next.save(&self.path)?;

        let next = Arc::new(next);
        *current = next.clone();
        tracing::info!(
            album = %next.immich.album,
            rotation = next.immich.rotation,
            interval = next.immich.wakeup_interval,
            "Settings updated"
        );
        Ok(next)
    }
}
