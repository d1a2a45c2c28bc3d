use serde::{Deserialize, Serialize};
use spectra_dither::{DisplayMode, DitherAlgorithm, FrameRenderer, Rotation};
use std::path::Path;
use thiserror::Error;
use utoipa::ToSchema;

use super::PanelSpec;
use crate::services::sleep_scheduler::SleepWindow;

/// Application configuration loaded from config.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AppConfig {
    /// Album source and rendering settings
    pub immich: ImmichSettings,
}

/// Settings under the `immich:` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImmichSettings {
    /// Base URL of the Immich server
    pub url: String,
    /// Name of the album to show
    pub album: String,
    /// Clockwise mounting rotation: 0, 90, 180 or 270
    pub rotation: u32,
    /// Saturation multiplier
    pub enhanced: f32,
    /// Contrast multiplier
    pub contrast: f32,
    /// Error diffusion strength
    pub strength: f32,
    /// `fill` or `fit`
    pub display_mode: String,
    /// `random` or `newest`
    pub image_order: String,
    /// `atkinson` or `floyd-steinberg`
    #[serde(default = "default_dithering_method")]
    pub dithering_method: String,
    pub sleep_start_hour: u32,
    pub sleep_start_minute: u32,
    pub sleep_end_hour: u32,
    pub sleep_end_minute: u32,
    /// Minutes between client wake-ups
    pub wakeup_interval: u32,
}

fn default_dithering_method() -> String {
    "atkinson".to_string()
}

/// Photo selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrder {
    /// Walk the album, skipping photos already shown.
    Random,
    /// Always the most recent capture.
    Newest,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid rotation: {0} (expected 0, 90, 180 or 270)")]
    InvalidRotation(u32),

    #[error("Invalid wakeup interval: {0} (expected 1-1440 minutes)")]
    InvalidInterval(u32),

    #[error("Invalid {field}: {value}")]
    InvalidTime { field: &'static str, value: u32 },

    #[error("Invalid {field}: must be a finite number")]
    NonFinite { field: &'static str },

    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SettingsUpdate {
    pub url: Option<String>,
    pub album: Option<String>,
    pub rotation: Option<u32>,
    pub enhanced: Option<f32>,
    pub contrast: Option<f32>,
    pub strength: Option<f32>,
    pub display_mode: Option<String>,
    pub image_order: Option<String>,
    pub dithering_method: Option<String>,
    pub sleep_start_hour: Option<u32>,
    pub sleep_start_minute: Option<u32>,
    pub sleep_end_hour: Option<u32>,
    pub sleep_end_minute: Option<u32>,
    pub wakeup_interval: Option<u32>,
}

impl ImmichSettings {
    /// Defaults, each overridable by an environment variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            fallback: T,
        ) -> T {
            match lookup(key) {
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    tracing::warn!(key, value = %raw, "Ignoring unparseable environment default");
                    fallback
                }),
                None => fallback,
            }
        }
        let text = |key: &str, fallback: &str| lookup(key).unwrap_or_else(|| fallback.to_string());

        Self {
            url: text("IMMICH_URL", "http://192.168.1.10"),
            album: text("ALBUM_NAME", "default_album"),
            rotation: parsed(&lookup, "ROTATION_ANGLE", 270),
            enhanced: parsed(&lookup, "COLOR_ENHANCE", 1.3),
            contrast: parsed(&lookup, "CONTRAST", 0.9),
            strength: parsed(&lookup, "DITHERING_STRENGTH", 0.8),
            display_mode: text("DISPLAY_MODE", "fill"),
            image_order: text("IMAGE_ORDER", "random"),
            dithering_method: text("DITHERING_METHOD", "atkinson"),
            sleep_start_hour: parsed(&lookup, "SLEEP_START_HOUR", 23),
            sleep_start_minute: parsed(&lookup, "SLEEP_START_MINUTE", 0),
            sleep_end_hour: parsed(&lookup, "SLEEP_END_HOUR", 6),
            sleep_end_minute: parsed(&lookup, "SLEEP_END_MINUTE", 0),
            wakeup_interval: parsed(&lookup, "WAKEUP_INTERVAL", 60),
        }
    }

    /// Check every field that would otherwise fail at use time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Rotation::try_from(self.rotation).is_err() {
            return Err(ConfigError::InvalidRotation(self.rotation));
        }
        if !(1..=1440).contains(&self.wakeup_interval) {
            return Err(ConfigError::InvalidInterval(self.wakeup_interval));
        }
        for (field, value) in [
            ("sleep_start_hour", self.sleep_start_hour),
            ("sleep_end_hour", self.sleep_end_hour),
        ] {
            if value > 23 {
                return Err(ConfigError::InvalidTime { field, value });
            }
        }
        for (field, value) in [
            ("sleep_start_minute", self.sleep_start_minute),
            ("sleep_end_minute", self.sleep_end_minute),
        ] {
            if value > 59 {
                return Err(ConfigError::InvalidTime { field, value });
            }
        }
        for (field, value) in [
            ("enhanced", self.enhanced),
            ("contrast", self.contrast),
            ("strength", self.strength),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        Ok(())
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::try_from(self.rotation).unwrap_or_default()
    }

    /// Unknown names fall back to fill.
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode.parse().unwrap_or_else(|_| {
            tracing::warn!(display_mode = %self.display_mode, "Unknown display mode, using fill");
            DisplayMode::Fill
        })
    }

    /// Unknown values fall back to random.
    pub fn image_order(&self) -> ImageOrder {
        match self.image_order.trim().to_ascii_lowercase().as_str() {
            "newest" => ImageOrder::Newest,
            "random" => ImageOrder::Random,
            other => {
                tracing::warn!(image_order = %other, "Unknown image order, using random");
                ImageOrder::Random
            }
        }
    }

    /// Unknown names fall back to Atkinson.
    pub fn dithering(&self) -> DitherAlgorithm {
        self.dithering_method.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to atkinson");
            DitherAlgorithm::Atkinson
        })
    }

    pub fn sleep_window(&self) -> SleepWindow {
        SleepWindow::new(
            self.sleep_start_hour,
            self.sleep_start_minute,
            self.sleep_end_hour,
            self.sleep_end_minute,
        )
    }

    /// Pipeline configured from these settings.
    pub fn renderer(&self, panel: PanelSpec) -> FrameRenderer {
        FrameRenderer::new()
            .panel(panel.width, panel.height)
            .rotation(self.rotation())
            .display_mode(self.display_mode())
            .saturation(self.enhanced)
            .contrast(self.contrast)
            .algorithm(self.dithering())
            .strength(self.strength)
    }

    /// Overlay `update` onto a copy of these settings.
    pub fn merged(&self, update: SettingsUpdate) -> Self {
        let mut next = self.clone();
        macro_rules! apply {
            ($($field:ident),*) => {
                $(if let Some(value) = update.$field { next.$field = value; })*
            };
        }
        apply!(
            url,
            album,
            rotation,
            enhanced,
            contrast,
            strength,
            display_mode,
            image_order,
            dithering_method,
            sleep_start_hour,
            sleep_start_minute,
            sleep_end_hour,
            sleep_end_minute,
            wakeup_interval
        );
        next
    }
}

impl Default for ImmichSettings {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl AppConfig {
    /// Parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.immich.validate()?;
        Ok(config)
    }

    /// Load the config, creating it with defaults if missing.
    ///
    /// Unreadable or invalid files are logged and replaced by defaults in
    /// memory; the file itself is left alone.
    pub fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.save(path) {
                Ok(()) => tracing::info!(path = %path.display(), "Created default config"),
                Err(e) => tracing::warn!(%e, path = %path.display(), "Failed to create config"),
            }
            return config;
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(
                    album = %config.immich.album,
                    rotation = config.immich.rotation,
                    dithering = %config.immich.dithering_method,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Write as YAML, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }
}
