use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::DeliveryStatus;
use crate::services::{BatteryMonitor, FrameStore, PhotoService};

/// Header carrying the panel's battery voltage in millivolts
pub const BATTERY_HEADER: &str = "batteryCap";

/// Response from the prepare endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct PrepareResponse {
    pub success: bool,
    pub message: String,
    /// Album source id of the prepared photo
    pub asset_id: String,
    /// Cache-busting link to the preview image
    pub preview_url: String,
}

/// State of the stored frame
#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewStatusResponse {
    /// Whether a frame has been prepared
    pub exists: bool,
    /// `new` until the panel has fetched the frame, then `delivered`
    pub status: Option<DeliveryStatus>,
    /// Pipeline stage: idle, selecting, downloading, processing or ready
    pub stage: String,
    pub asset_id: Option<String>,
    /// Unix time the frame was prepared
    pub timestamp: Option<i64>,
    /// Local preparation time as `%Y-%m-%d %H:%M:%S`
    pub formatted_time: Option<String>,
}

/// Fetch the frame for the panel
///
/// Serves a prepared frame once. Without one, a new photo is rendered
/// before responding.
#[utoipa::path(
    get,
    path = "/download",
    responses(
        (status = 200, description = "Transfer text of the frame", body = String, content_type = "text/plain"),
        (status = 404, description = "Album not found or empty"),
        (status = 502, description = "Album source unreachable"),
    ),
    params(
        ("batteryCap" = Option<f32>, Header, description = "Battery voltage in millivolts"),
    ),
    tag = "Frame"
)]
pub async fn handle_download(
    State(photos): State<Arc<PhotoService>>,
    State(battery): State<Arc<BatteryMonitor>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(value) = headers.get(BATTERY_HEADER).and_then(|v| v.to_str().ok()) {
        battery.record(value, Utc::now()).await;
    }

    let text = photos.fetch().await?;
    tracing::info!(size_bytes = text.len(), "Frame delivered");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}

/// Prepare the next frame ahead of the panel's wakeup
#[utoipa::path(
    post,
    path = "/prepare-photo",
    responses(
        (status = 200, description = "Frame prepared", body = PrepareResponse),
        (status = 404, description = "Album not found or empty"),
        (status = 502, description = "Album source unreachable"),
    ),
    tag = "Frame"
)]
pub async fn handle_prepare(
    State(photos): State<Arc<PhotoService>>,
) -> Result<Json<PrepareResponse>, ApiError> {
    let frame = photos.prepare().await?;
    Ok(Json(PrepareResponse {
        success: true,
        message: "Photo prepared successfully".to_string(),
        asset_id: frame.asset_id,
        preview_url: format!("./preview-photo?t={}", Utc::now().timestamp()),
    }))
}

/// Preview of the stored frame as an indexed PNG
#[utoipa::path(
    get,
    path = "/preview-photo",
    responses(
        (status = 200, description = "PNG preview", content_type = "image/png"),
        (status = 404, description = "No frame prepared yet"),
    ),
    tag = "Frame"
)]
pub async fn handle_preview(State(frames): State<Arc<FrameStore>>) -> Result<Response, ApiError> {
    let png = frames
        .preview()
        .await
        .filter(|p| !p.is_empty())
        .ok_or(ApiError::NotFound("No preview available"))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONTENT_LENGTH, &png.len().to_string()),
        ],
        Bytes::from(png),
    )
        .into_response())
}

/// Delivery status and pipeline stage
#[utoipa::path(
    get,
    path = "/preview-status",
    responses(
        (status = 200, description = "Current frame status", body = PreviewStatusResponse),
    ),
    tag = "Frame"
)]
pub async fn handle_preview_status(
    State(frames): State<Arc<FrameStore>>,
) -> Json<PreviewStatusResponse> {
    let snapshot = frames.snapshot().await;
    Json(PreviewStatusResponse {
        exists: snapshot.exists,
        status: snapshot.status,
        stage: snapshot.stage.name().to_string(),
        asset_id: snapshot.asset_id,
        timestamp: snapshot.prepared_at.map(|t| t.timestamp()),
        formatted_time: snapshot.prepared_at.map(format_local),
    })
}

fn format_local(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
