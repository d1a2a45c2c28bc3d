//! Mock Immich server for album source tests.

use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const API_KEY: &str = "test-api-key";

/// Wrapper around wiremock MockServer speaking the Immich REST API
pub struct MockImmichServer {
    pub server: MockServer,
}

impl MockImmichServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to put in the settings
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mock a GET endpoint returning JSON, requiring the API key
    pub async fn mock_get_json(&self, endpoint: &str, response: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("x-api-key", API_KEY))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(response)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&self.server)
            .await;
    }

    /// Album list with one album per `(id, name)`
    pub async fn mock_albums(&self, albums: &[(&str, &str)]) {
        let list: Vec<_> = albums
            .iter()
            .map(|(id, name)| json!({ "id": id, "albumName": name }))
            .collect();
        self.mock_get_json("/api/albums", json!(list)).await;
    }

    /// Album detail; each asset is `(id, originalPath, dateTimeOriginal)`
    pub async fn mock_album(&self, album_id: &str, assets: &[(&str, &str, Option<&str>)]) {
        let assets: Vec<_> = assets
            .iter()
            .map(|(id, original_path, taken)| {
                json!({
                    "id": id,
                    "originalPath": original_path,
                    "exifInfo": { "dateTimeOriginal": taken },
                })
            })
            .collect();
        self.mock_get_json(
            &format!("/api/albums/{album_id}"),
            json!({ "id": album_id, "assets": assets }),
        )
        .await;
    }

    /// Original bytes of an asset
    pub async fn mock_original(&self, asset_id: &str, bytes: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(format!("/api/assets/{asset_id}/original")))
            .and(header("x-api-key", API_KEY))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(bytes)
                    .insert_header("content-type", "application/octet-stream"),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_ping(&self) {
        self.mock_get_json("/api/server/ping", json!({ "res": "pong" }))
            .await;
    }

    /// Mock an endpoint that returns an error status
    pub async fn mock_error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }
}
