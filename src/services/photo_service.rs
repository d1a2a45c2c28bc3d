//! The photo pipeline: select, download, render, store.
//!
//! Two entry points share one run:
//! - [`PhotoService::prepare`] renders a fresh frame and parks it as `new`
//!   for the next fetch.
//! - [`PhotoService::fetch`] serves a parked frame once, otherwise renders
//!   one on the spot and stores it as `delivered`.

use std::sync::Arc;
use thiserror::Error;

use super::album_source::{AlbumSource, UpstreamError};
use super::asset_selector::AssetSelector;
use super::config_store::ConfigStore;
use super::frame_store::{FrameStore, PreparedFrame};
use crate::models::{AppConfig, DeliveryStatus, PanelSpec, PipelineStage};
use crate::rendering::{render_photo, RenderError};

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Render task failed: {0}")]
    Task(String),
}

pub struct PhotoService {
    source: Arc<dyn AlbumSource>,
    config: Arc<ConfigStore>,
    selector: AssetSelector,
    frames: Arc<FrameStore>,
    panel: PanelSpec,
}

impl PhotoService {
    pub fn new(
        source: Arc<dyn AlbumSource>,
        config: Arc<ConfigStore>,
        selector: AssetSelector,
        frames: Arc<FrameStore>,
        panel: PanelSpec,
    ) -> Self {
        Self {
            source,
            config,
            selector,
            frames,
            panel,
        }
    }

    pub fn frames(&self) -> &Arc<FrameStore> {
        &self.frames
    }

    /// Render a fresh frame and store it as `new`.
    pub async fn prepare(&self) -> Result<PreparedFrame, PhotoError> {
        let frame = self.run().await?;
        self.frames.store(frame.clone(), DeliveryStatus::New).await;
        Ok(frame)
    }

    /// Transfer text for the panel.
    pub async fn fetch(&self) -> Result<String, PhotoError> {
        if let Some(text) = self.frames.take_new().await {
            tracing::info!("Serving prepared frame");
            return Ok(text);
        }
        let frame = self.run().await?;
        Ok(self.frames.deliver(frame).await)
    }

    async fn run(&self) -> Result<PreparedFrame, PhotoError> {
        let config = self.config.snapshot().await;
        self.frames.set_stage(PipelineStage::Selecting).await;
        let result = self.run_with(&config).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, album = %config.immich.album, "Photo pipeline failed");
            self.frames.abandon_run().await;
        }
        result
    }

    async fn run_with(&self, config: &AppConfig) -> Result<PreparedFrame, PhotoError> {
        let settings = &config.immich;
        let assets = self.source.find_album_assets(settings).await?;

        let selection = self.selector.begin().await;
        let plan = selection
            .plan(settings.image_order(), &settings.album, &assets)
            .ok_or_else(|| UpstreamError::EmptyAlbum(settings.album.clone()))?;
        tracing::info!(
            asset_id = %plan.asset.id,
            album = %settings.album,
            total = assets.len(),
            "Selected photo"
        );

        self.frames.set_stage(PipelineStage::Downloading).await;
        let original = self.source.fetch_original(settings, &plan.asset.id).await?;
        selection.commit(&settings.album, &plan);

        self.frames.set_stage(PipelineStage::Processing).await;
        let renderer = settings.renderer(self.panel);
        let kind = plan.asset.media_kind();
        let rendered = tokio::task::spawn_blocking(move || render_photo(&original, kind, &renderer))
            .await
            .map_err(|e| PhotoError::Task(e.to_string()))??;

        Ok(PreparedFrame {
            text: rendered.frame.text,
            preview_png: rendered.preview_png,
            asset_id: plan.asset.id,
        })
    }
}
