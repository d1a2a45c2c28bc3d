pub mod frame;
pub mod health;
pub mod schedule;
pub mod settings;

pub use frame::{__path_handle_download, __path_handle_prepare};
pub use frame::{__path_handle_preview, __path_handle_preview_status};
pub use frame::{
    handle_download, handle_prepare, handle_preview, handle_preview_status, PrepareResponse,
    PreviewStatusResponse,
};
pub use health::{handle_health, HealthResponse, __path_handle_health};
pub use schedule::{handle_sleep, __path_handle_sleep};
pub use settings::{__path_handle_get_settings, __path_handle_update_settings};
pub use settings::{handle_get_settings, handle_update_settings, BatteryStatus, SettingsResponse};
