use axum::{extract::State, response::Json, Json as JsonExtractor};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, ImmichSettings, SettingsUpdate};
use crate::services::{BatteryMonitor, ConfigStore};

/// Last battery reading from the panel
#[derive(Debug, Serialize, ToSchema)]
pub struct BatteryStatus {
    pub voltage: f32,
    /// Estimated charge, 0-100
    pub percentage: f32,
}

/// Current settings
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub immich: ImmichSettings,
    /// Present while a reading less than an hour old exists
    pub battery: Option<BatteryStatus>,
}

async fn settings_response(config: &AppConfig, battery: &BatteryMonitor) -> SettingsResponse {
    SettingsResponse {
        immich: config.immich.clone(),
        battery: battery.current(Utc::now()).await.map(|r| BatteryStatus {
            voltage: r.millivolts,
            percentage: r.percentage(),
        }),
    }
}

/// Read the active settings
#[utoipa::path(
    get,
    path = "/settings",
    responses(
        (status = 200, description = "Active settings", body = SettingsResponse),
    ),
    tag = "Settings"
)]
pub async fn handle_get_settings(
    State(config): State<Arc<ConfigStore>>,
    State(battery): State<Arc<BatteryMonitor>>,
) -> Json<SettingsResponse> {
    let snapshot = config.snapshot().await;
    Json(settings_response(&snapshot, &battery).await)
}

/// Update some or all settings
///
/// Only the fields present in the body change. Invalid values are rejected
/// and the active settings stay as they were.
#[utoipa::path(
    post,
    path = "/settings",
    request_body = SettingsUpdate,
    responses(
        (status = 200, description = "Settings saved", body = SettingsResponse),
        (status = 400, description = "Invalid value"),
    ),
    tag = "Settings"
)]
pub async fn handle_update_settings(
    State(config): State<Arc<ConfigStore>>,
    State(battery): State<Arc<BatteryMonitor>>,
    JsonExtractor(update): JsonExtractor<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let updated = config.update(update).await?;
    Ok(Json(settings_response(&updated, &battery).await))
}
