use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::services::{AlbumSource, ConfigStore};

/// Service health
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    pub timestamp: String,
    /// `connected` or `unreachable`
    pub immich: String,
}

/// Health check including album source reachability
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Album source reachable", body = HealthResponse),
        (status = 503, description = "Album source unreachable", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn handle_health(
    State(source): State<Arc<dyn AlbumSource>>,
    State(config): State<Arc<ConfigStore>>,
) -> impl IntoResponse {
    let config = config.snapshot().await;
    let connected = source.ping(&config.immich).await;
    let (status, health, immich) = if connected {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    (
        status,
        Json(HealthResponse {
            status: health.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            immich: immich.to_string(),
        }),
    )
}
