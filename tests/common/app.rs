//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use inkframe::models::{AppConfig, PanelSpec};
use inkframe::server::{build_router, create_app_state, AppState, ServerPaths};
use inkframe::services::{AlbumSource, InMemoryAlbum};

use super::fixtures::{self, albums};

/// Test application with router, state and a private photo/config directory
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    /// App backed by an in-memory album named [`albums::TRIP`]
    pub fn new(source: Arc<InMemoryAlbum>) -> Self {
        Self::with_source(source, |_| {})
    }

    /// App over any album source, with the written config adjusted by `edit`
    pub fn with_source(source: Arc<dyn AlbumSource>, edit: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let paths = ServerPaths {
            config_path: dir.path().join("config").join("config.yaml"),
            photo_dir: dir.path().join("photos"),
        };

        let mut config = fixtures::test_config();
        edit(&mut config);
        config.save(&paths.config_path).expect("Failed to write config");

        let state = create_app_state(&paths, source, fixtures::TEST_PANEL)
            .expect("Failed to create app state");
        let router = build_router(state.clone());

        Self { router, state, dir }
    }

    pub fn photo_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("photos")
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.dir.path().join("config").join("config.yaml")
    }

    /// Contents of a file in the photo directory
    pub fn read_artifact(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.photo_dir().join(name)).ok()
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a GET request with custom headers
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::get(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a POST request without a body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Prepare a frame and return its asset id
    pub async fn prepare(&self) -> String {
        let response = self.post("/prepare-photo").await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        let json: serde_json::Value = response.json();
        json["asset_id"].as_str().unwrap().to_string()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
