//! Tests for the Immich album source against a mock server.

mod common;

use common::{fixtures, mock_immich::API_KEY, MockImmichServer, TestApp};
use pretty_assertions::assert_eq;
use std::sync::Arc;

use inkframe::models::ImmichSettings;
use inkframe::services::{AlbumSource, ImmichClient, UpstreamError};

fn settings(server: &MockImmichServer, album: &str) -> ImmichSettings {
    let mut settings = fixtures::test_config().immich;
    settings.url = format!("{}/", server.url());
    settings.album = album.to_string();
    settings
}

fn client() -> ImmichClient {
    ImmichClient::new(Some(API_KEY.to_string()))
}

#[tokio::test]
async fn test_find_album_assets() {
    let server = MockImmichServer::start().await;
    server
        .mock_albums(&[("alb-1", "Other"), ("alb-2", "Trip")])
        .await;
    server
        .mock_album(
            "alb-2",
            &[
                ("a1", "/library/a1.jpg", Some("2022-03-04T05:06:07.000Z")),
                ("a2", "/library/a2.dng", None),
            ],
        )
        .await;

    let assets = client()
        .find_album_assets(&settings(&server, "Trip"))
        .await
        .unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].id, "a1");
    assert_eq!(
        assets[0].taken_at.unwrap().to_rfc3339(),
        "2022-03-04T05:06:07+00:00"
    );
    assert_eq!(assets[1].original_path, "/library/a2.dng");
    assert!(assets[1].taken_at.is_none());
}

#[tokio::test]
async fn test_album_not_found() {
    let server = MockImmichServer::start().await;
    server.mock_albums(&[("alb-1", "Other")]).await;

    let err = client()
        .find_album_assets(&settings(&server, "Trip"))
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::AlbumNotFound(ref name) if name == "Trip"));
}

#[tokio::test]
async fn test_empty_album() {
    let server = MockImmichServer::start().await;
    server.mock_albums(&[("alb-1", "Trip")]).await;
    server.mock_album("alb-1", &[]).await;

    let err = client()
        .find_album_assets(&settings(&server, "Trip"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No photos found in album 'Trip'");
}

#[tokio::test]
async fn test_error_status() {
    let server = MockImmichServer::start().await;
    server.mock_error("/api/albums", 401, "unauthorized").await;

    let err = client()
        .find_album_assets(&settings(&server, "Trip"))
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status: 401, .. }));
    assert_eq!(err.to_string(), "/api/albums returned HTTP 401");
}

#[tokio::test]
async fn test_wrong_api_key_gets_no_match() {
    let server = MockImmichServer::start().await;
    server.mock_albums(&[("alb-1", "Trip")]).await;

    let err = ImmichClient::new(Some("wrong".into()))
        .find_album_assets(&settings(&server, "Trip"))
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_fetch_original_and_ping() {
    let server = MockImmichServer::start().await;
    server.mock_original("a1", vec![1, 2, 3, 4]).await;
    server.mock_ping().await;

    let settings = settings(&server, "Trip");
    assert_eq!(
        client().fetch_original(&settings, "a1").await.unwrap(),
        vec![1, 2, 3, 4]
    );
    assert!(client().ping(&settings).await);
}

#[tokio::test]
async fn test_unreachable_server() {
    let mut settings = fixtures::test_config().immich;
    settings.url = "http://127.0.0.1:9".to_string();

    assert!(!client().ping(&settings).await);
    let err = client().find_album_assets(&settings).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Transport(_)));
}

#[tokio::test]
async fn test_full_flow_through_router() {
    let server = MockImmichServer::start().await;
    server.mock_albums(&[("alb-1", "Trip")]).await;
    server
        .mock_album(
            "alb-1",
            &[
                ("a1", "/library/a1.png", None),
                ("a2", "/library/a2.png", None),
            ],
        )
        .await;
    server
        .mock_original("a1", fixtures::png_photo([255, 0, 0]))
        .await;
    server
        .mock_original("a2", fixtures::png_photo([0, 0, 255]))
        .await;
    server.mock_ping().await;

    let url = server.url();
    let app = TestApp::with_source(Arc::new(client()), |c| c.immich.url = url);

    common::assert_ok(&app.get("/health").await);
    assert_eq!(app.prepare().await, "a1");
    common::assert_frame_text(&app.get("/download").await, 16 * 16);
    common::assert_frame_text(&app.get("/download").await, 16 * 16);
    assert_eq!(
        app.read_artifact("tracking.txt").as_deref(),
        Some("Trip\na1\na2\n")
    );
}
