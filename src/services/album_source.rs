//! Album source: where photos come from.
//!
//! [`ImmichClient`] talks to an Immich server over its REST API.
//! [`InMemoryAlbum`] serves a fixed set of assets and is used by tests and
//! the offline CLI.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Asset, ImmichSettings};

const METADATA_TIMEOUT: Duration = Duration::from_secs(10);
const ORIGINAL_TIMEOUT: Duration = Duration::from_secs(30);
const PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Album source is not configured")]
    NotConfigured,

    #[error("Album '{0}' not found")]
    AlbumNotFound(String),

    #[error("No photos found in album '{0}'")]
    EmptyAlbum(String),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for photo album backends.
#[async_trait]
pub trait AlbumSource: Send + Sync {
    /// Assets of the album named in `settings`, in album order.
    ///
    /// Fails with [`UpstreamError::AlbumNotFound`] when no album matches and
    /// [`UpstreamError::EmptyAlbum`] when it has no assets.
    async fn find_album_assets(&self, settings: &ImmichSettings) -> Result<Vec<Asset>, UpstreamError>;

    /// Original file bytes of an asset.
    async fn fetch_original(
        &self,
        settings: &ImmichSettings,
        asset_id: &str,
    ) -> Result<Vec<u8>, UpstreamError>;

    /// Whether the backend answers at all.
    async fn ping(&self, settings: &ImmichSettings) -> bool;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumSummary {
    id: String,
    album_name: String,
}

#[derive(Debug, Deserialize)]
struct AlbumDetail {
    #[serde(default)]
    assets: Vec<AssetRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetRecord {
    id: String,
    #[serde(default)]
    original_path: String,
    #[serde(default)]
    exif_info: Option<ExifRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExifRecord {
    #[serde(default)]
    date_time_original: Option<String>,
}

impl From<AssetRecord> for Asset {
    fn from(record: AssetRecord) -> Self {
        let taken_at = record
            .exif_info
            .and_then(|e| e.date_time_original)
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Asset {
            id: record.id,
            taken_at,
            original_path: record.original_path,
        }
    }
}

/// Immich REST client.
pub struct ImmichClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl ImmichClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Reads `IMMICH_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(std::env::var("IMMICH_API_KEY").ok())
    }

    fn request(
        &self,
        settings: &ImmichSettings,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<reqwest::RequestBuilder, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::NotConfigured)?;
        let url = format!("{}{}", settings.url.trim_end_matches('/'), endpoint);
        Ok(self
            .http
            .get(url)
            .header("x-api-key", api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout))
    }

    async fn send(
        &self,
        settings: &ImmichSettings,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .request(settings, endpoint, timeout)?
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        settings: &ImmichSettings,
        endpoint: &str,
    ) -> Result<T, UpstreamError> {
        self.send(settings, endpoint, METADATA_TIMEOUT)
            .await?
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AlbumSource for ImmichClient {
    async fn find_album_assets(&self, settings: &ImmichSettings) -> Result<Vec<Asset>, UpstreamError> {
        let albums: Vec<AlbumSummary> = self.get_json(settings, "/api/albums").await?;
        let album = albums
            .into_iter()
            .find(|a| a.album_name == settings.album)
            .ok_or_else(|| UpstreamError::AlbumNotFound(settings.album.clone()))?;

        tracing::debug!(album = %settings.album, album_id = %album.id, "Resolved album");

        let detail: AlbumDetail = self
            .get_json(settings, &format!("/api/albums/{}", album.id))
            .await?;
        if detail.assets.is_empty() {
            return Err(UpstreamError::EmptyAlbum(settings.album.clone()));
        }
        Ok(detail.assets.into_iter().map(Asset::from).collect())
    }

    async fn fetch_original(
        &self,
        settings: &ImmichSettings,
        asset_id: &str,
    ) -> Result<Vec<u8>, UpstreamError> {
        let endpoint = format!("/api/assets/{asset_id}/original");
        let bytes = self
            .send(settings, &endpoint, ORIGINAL_TIMEOUT)
            .await?
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        tracing::debug!(asset_id = %asset_id, size = bytes.len(), "Downloaded original");
        Ok(bytes.to_vec())
    }

    async fn ping(&self, settings: &ImmichSettings) -> bool {
        match self.send(settings, "/api/server/ping", PING_TIMEOUT).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Album source ping failed");
                false
            }
        }
    }
}

/// Album source backed by memory, keyed by album name.
pub struct InMemoryAlbum {
    albums: RwLock<HashMap<String, Vec<Asset>>>,
    originals: RwLock<HashMap<String, Vec<u8>>>,
    online: RwLock<bool>,
}

impl InMemoryAlbum {
    pub fn new() -> Self {
        Self {
            albums: RwLock::new(HashMap::new()),
            originals: RwLock::new(HashMap::new()),
            online: RwLock::new(true),
        }
    }

    /// Add an asset with its original bytes to `album`.
    pub async fn insert(&self, album: &str, asset: Asset, original: Vec<u8>) {
        self.originals.write().await.insert(asset.id.clone(), original);
        self.albums
            .write()
            .await
            .entry(album.to_string())
            .or_default()
            .push(asset);
    }

    /// Simulate the backend going away or coming back.
    pub async fn set_online(&self, online: bool) {
        *self.online.write().await = online;
    }

    async fn check_online(&self) -> Result<(), UpstreamError> {
        if *self.online.read().await {
            Ok(())
        } else {
            Err(UpstreamError::Transport("connection refused".into()))
        }
    }
}

impl Default for InMemoryAlbum {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlbumSource for InMemoryAlbum {
    async fn find_album_assets(&self, settings: &ImmichSettings) -> Result<Vec<Asset>, UpstreamError> {
        self.check_online().await?;
        let albums = self.albums.read().await;
        let assets = albums
            .get(&settings.album)
            .ok_or_else(|| UpstreamError::AlbumNotFound(settings.album.clone()))?;
        if assets.is_empty() {
            return Err(UpstreamError::EmptyAlbum(settings.album.clone()));
        }
        Ok(assets.clone())
    }

    async fn fetch_original(
        &self,
        _settings: &ImmichSettings,
        asset_id: &str,
    ) -> Result<Vec<u8>, UpstreamError> {
        self.check_online().await?;
        self.originals
            .read()
            .await
            .get(asset_id)
            .cloned()
            .ok_or_else(|| UpstreamError::Status {
                endpoint: format!("/api/assets/{asset_id}/original"),
                status: 404,
            })
    }

    async fn ping(&self, _settings: &ImmichSettings) -> bool {
        *self.online.read().await
    }
}
