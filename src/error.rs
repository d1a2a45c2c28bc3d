use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::ConfigError;
use crate::services::{PhotoError, UpstreamError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Invalid settings: {0}")]
    Settings(#[from] ConfigError),

    #[error(transparent)]
    Photo(#[from] PhotoError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Settings(ConfigError::Io(_) | ConfigError::Parse(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Settings(_) => StatusCode::BAD_REQUEST,
            ApiError::Photo(PhotoError::Upstream(e)) => match e {
                UpstreamError::AlbumNotFound(_) | UpstreamError::EmptyAlbum(_) => {
                    StatusCode::NOT_FOUND
                }
                UpstreamError::Status { .. }
                | UpstreamError::Transport(_)
                | UpstreamError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
                UpstreamError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Photo(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::{DecodeError, RenderError};

    #[test]
    fn test_not_found_message() {
        let error = ApiError::NotFound("No preview available");
        assert_eq!(error.to_string(), "No preview available");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_settings_errors() {
        let error = ApiError::from(ConfigError::InvalidRotation(45));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().starts_with("Invalid settings: "));

        let io = ConfigError::Io(std::io::Error::other("disk full"));
        assert_eq!(
            ApiError::from(io).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_status_codes() {
        let cases = [
            (UpstreamError::AlbumNotFound("x".into()), StatusCode::NOT_FOUND),
            (UpstreamError::EmptyAlbum("x".into()), StatusCode::NOT_FOUND),
            (
                UpstreamError::Status {
                    endpoint: "/api/albums".into(),
                    status: 401,
                },
                StatusCode::BAD_GATEWAY,
            ),
            (UpstreamError::Transport("timeout".into()), StatusCode::BAD_GATEWAY),
            (UpstreamError::NotConfigured, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (upstream, expected) in cases {
            let error = ApiError::from(PhotoError::from(upstream));
            assert_eq!(error.status_code(), expected, "{error}");
        }
    }

    #[test]
    fn test_decode_error_is_internal() {
        let error = ApiError::from(PhotoError::from(RenderError::from(
            DecodeError::UnsupportedFormat("heic"),
        )));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Unsupported image format: heic");
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::NotFound("missing").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            ApiError::from(PhotoError::Task("render task panicked".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::from(ConfigError::InvalidInterval(0)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
