pub mod asset;
pub mod battery;
pub mod config;
pub mod delivery;
pub mod panel;

pub use asset::{Asset, MediaKind};
pub use battery::{battery_percentage, BatteryReading};
pub use config::{AppConfig, ConfigError, ImageOrder, ImmichSettings, SettingsUpdate};
pub use delivery::{DeliveryStatus, PipelineStage};
pub use panel::PanelSpec;
