pub mod album_source;
pub mod asset_selector;
pub mod battery_monitor;
pub mod config_store;
pub mod file_watcher;
pub mod frame_store;
pub mod photo_service;
pub mod sleep_scheduler;
pub mod tracking_log;

pub use album_source::{AlbumSource, ImmichClient, InMemoryAlbum, UpstreamError};
pub use asset_selector::{plan_selection, AssetSelector, SelectionPlan};
pub use battery_monitor::BatteryMonitor;
pub use config_store::ConfigStore;
pub use file_watcher::ConfigWatcher;
pub use frame_store::{FrameSnapshot, FrameStore, PreparedFrame};
pub use photo_service::{PhotoError, PhotoService};
pub use sleep_scheduler::{plan_sleep, SleepPlan, SleepWindow};
pub use tracking_log::TrackingLog;
