//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::State,
    http::{header::CONNECTION, HeaderMap, HeaderValue},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::{PanelSpec, SettingsUpdate};
use crate::services::{
    AlbumSource, AssetSelector, BatteryMonitor, ConfigStore, FrameStore, PhotoService,
    SleepPlan, TrackingLog,
};

pub const DEFAULT_CONFIG_PATH: &str = "/config/config.yaml";
pub const DEFAULT_PHOTO_DIR: &str = "/photos";

/// Where the server keeps its files.
#[derive(Debug, Clone)]
pub struct ServerPaths {
    /// YAML settings file
    pub config_path: PathBuf,
    /// Tracking log and latest frame artifacts
    pub photo_dir: PathBuf,
}

impl ServerPaths {
    /// Read `CONFIG_PATH` and `IMMICH_PHOTO_DEST`.
    pub fn from_env() -> Self {
        Self {
            config_path: std::env::var("CONFIG_PATH")
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
                .into(),
            photo_dir: std::env::var("IMMICH_PHOTO_DEST")
                .unwrap_or_else(|_| DEFAULT_PHOTO_DIR.to_string())
                .into(),
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub photos: Arc<PhotoService>,
    pub frames: Arc<FrameStore>,
    pub config: Arc<ConfigStore>,
    pub source: Arc<dyn AlbumSource>,
    pub battery: Arc<BatteryMonitor>,
}

/// Create application state, restoring the last frame from the photo
/// directory.
pub fn create_app_state(
    paths: &ServerPaths,
    source: Arc<dyn AlbumSource>,
    panel: PanelSpec,
) -> anyhow::Result<AppState> {
    std::fs::create_dir_all(&paths.photo_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create photo directory {}: {e}",
            paths.photo_dir.display()
        )
    })?;

    let config = Arc::new(ConfigStore::open(&paths.config_path));
    let frames = Arc::new(FrameStore::restore(&paths.photo_dir));
    let selector = AssetSelector::new(TrackingLog::in_dir(&paths.photo_dir));
    let photos = Arc::new(PhotoService::new(
        source.clone(),
        config.clone(),
        selector,
        frames.clone(),
        panel,
    ));

    Ok(AppState {
        photos,
        frames,
        config,
        source,
        battery: Arc::new(BatteryMonitor::new()),
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. The panel
/// client never reuses connections, so every response carries
/// `Connection: close`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Panel endpoints
        .route("/download", get(handle_download))
        .route("/sleep", get(handle_sleep))
        // Web UI endpoints
        .route("/prepare-photo", post(handle_prepare))
        .route("/preview-photo", get(handle_preview))
        .route("/preview-status", get(handle_preview_status))
        .route(
            "/settings",
            get(handle_get_settings).post(handle_update_settings),
        )
        .route("/health", get(handle_health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CONNECTION,
            HeaderValue::from_static("close"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_download(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    api::handle_download(State(state.photos), State(state.battery), headers).await
}

async fn handle_prepare(
    State(state): State<AppState>,
) -> Result<Json<api::PrepareResponse>, ApiError> {
    api::handle_prepare(State(state.photos)).await
}

async fn handle_preview(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_preview(State(state.frames)).await
}

async fn handle_preview_status(
    State(state): State<AppState>,
) -> Json<api::PreviewStatusResponse> {
    api::handle_preview_status(State(state.frames)).await
}

async fn handle_sleep(State(state): State<AppState>) -> Json<SleepPlan> {
    api::handle_sleep(State(state.config)).await
}

async fn handle_get_settings(State(state): State<AppState>) -> Json<api::SettingsResponse> {
    api::handle_get_settings(State(state.config), State(state.battery)).await
}

async fn handle_update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<api::SettingsResponse>, ApiError> {
    api::handle_update_settings(State(state.config), State(state.battery), Json(update)).await
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    api::handle_health(State(state.source), State(state.config)).await
}
