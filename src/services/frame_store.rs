//! Holder of the most recently prepared frame.
//!
//! Frame text, preview and delivery status are swapped together under one
//! lock. The photo directory keeps a durable copy (`latest.txt`,
//! `latest_preview.png`, `latest.status`) that is read back at startup.
//! File errors are logged; the in-memory copy stays authoritative.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::models::{DeliveryStatus, PipelineStage};

pub const FRAME_FILE: &str = "latest.txt";
pub const PREVIEW_FILE: &str = "latest_preview.png";
pub const STATUS_FILE: &str = "latest.status";

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedFrame {
    /// Transfer text sent to the panel
    pub text: String,
    /// 4-bit indexed PNG of the dithered image
    pub preview_png: Vec<u8>,
    pub asset_id: String,
}

#[derive(Debug, Clone)]
struct StoredFrame {
    text: String,
    preview_png: Vec<u8>,
    asset_id: Option<String>,
    status: DeliveryStatus,
    prepared_at: DateTime<Utc>,
}

struct Slot {
    frame: Option<StoredFrame>,
    stage: PipelineStage,
}

/// Point-in-time view for status reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub exists: bool,
    pub status: Option<DeliveryStatus>,
    pub stage: PipelineStage,
    pub asset_id: Option<String>,
    pub prepared_at: Option<DateTime<Utc>>,
}

pub struct FrameStore {
    dir: PathBuf,
    slot: Mutex<Slot>,
}

impl FrameStore {
    /// Empty store persisting into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            slot: Mutex::new(Slot {
                frame: None,
                stage: PipelineStage::Idle,
            }),
        }
    }

    /// Store seeded from the files a previous run left in `dir`.
    ///
    /// A frame without a readable status file counts as delivered.
    pub fn restore(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let frame = read_frame(&dir);
        if let Some(frame) = &frame {
            tracing::info!(status = %frame.status, "Restored previous frame");
        }
        let stage = frame
            .as_ref()
            .map_or(PipelineStage::Idle, |f| PipelineStage::Ready(f.status));
        Self {
            dir,
            slot: Mutex::new(Slot { frame, stage }),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Hand out a frame that has not been fetched yet, marking it delivered.
    pub async fn take_new(&self) -> Option<String> {
        let mut slot = self.slot.lock().await;
        self.take_new_locked(&mut slot).await
    }

    /// Replace the current frame.
    pub async fn store(&self, frame: PreparedFrame, status: DeliveryStatus) {
        let mut slot = self.slot.lock().await;
        self.store_locked(&mut slot, frame, status).await;
    }

    /// Store a frame rendered for an immediate fetch and return the text to
    /// serve.
    ///
    /// A `new` frame that landed while the fetch was rendering wins: it is
    /// handed out and marked delivered, and `frame` is discarded.
    pub async fn deliver(&self, frame: PreparedFrame) -> String {
        let mut slot = self.slot.lock().await;
        if let Some(text) = self.take_new_locked(&mut slot).await {
            slot.stage = PipelineStage::Ready(DeliveryStatus::Delivered);
            tracing::info!(
                discarded = %frame.asset_id,
                "Prepared frame arrived during fetch, serving it instead"
            );
            return text;
        }
        let text = frame.text.clone();
        self.store_locked(&mut slot, frame, DeliveryStatus::Delivered)
            .await;
        text
    }

    async fn take_new_locked(&self, slot: &mut Slot) -> Option<String> {
        let frame = slot.frame.as_mut().filter(|f| f.status == DeliveryStatus::New)?;
        frame.status = DeliveryStatus::Delivered;
        let text = frame.text.clone();
        if !slot.stage.is_busy() {
            slot.stage = PipelineStage::Ready(DeliveryStatus::Delivered);
        }
        self.write_file(STATUS_FILE, DeliveryStatus::Delivered.as_str().as_bytes())
            .await;
        Some(text)
    }

    async fn store_locked(&self, slot: &mut Slot, frame: PreparedFrame, status: DeliveryStatus) {
        self.write_file(FRAME_FILE, frame.text.as_bytes()).await;
        self.write_file(PREVIEW_FILE, &frame.preview_png).await;
        self.write_file(STATUS_FILE, status.as_str().as_bytes()).await;

        tracing::info!(asset_id = %frame.asset_id, status = %status, "Stored frame");
        slot.frame = Some(StoredFrame {
            text: frame.text,
            preview_png: frame.preview_png,
            asset_id: Some(frame.asset_id),
            status,
            prepared_at: Utc::now(),
        });
        slot.stage = PipelineStage::Ready(status);
    }

    pub async fn set_stage(&self, stage: PipelineStage) {
        self.slot.lock().await.stage = stage;
    }

    /// Return to the stage implied by the stored frame after a failed run.
    pub async fn abandon_run(&self) {
        let mut slot = self.slot.lock().await;
        slot.stage = slot
            .frame
            .as_ref()
            .map_or(PipelineStage::Idle, |f| PipelineStage::Ready(f.status));
    }

    pub async fn preview(&self) -> Option<Vec<u8>> {
        let slot = self.slot.lock().await;
        slot.frame.as_ref().map(|f| f.preview_png.clone())
    }

    pub async fn snapshot(&self) -> FrameSnapshot {
        let slot = self.slot.lock().await;
        let frame = slot.frame.as_ref();
        FrameSnapshot {
            exists: frame.is_some(),
            status: frame.map(|f| f.status),
            stage: slot.stage,
            asset_id: frame.and_then(|f| f.asset_id.clone()),
            prepared_at: frame.map(|f| f.prepared_at),
        }
    }

    async fn write_file(&self, name: &str, contents: &[u8]) {
        let path = self.dir.join(name);
        if let Err(e) = tokio::fs::write(&path, contents).await {
            tracing::error!(error = %e, path = %path.display(), "Failed to persist frame artifact");
        }
    }
}

fn read_frame(dir: &Path) -> Option<StoredFrame> {
    let text = std::fs::read_to_string(dir.join(FRAME_FILE)).ok()?;
    let preview_path = dir.join(PREVIEW_FILE);
    let preview_png = std::fs::read(&preview_path).unwrap_or_default();
    let status = std::fs::read_to_string(dir.join(STATUS_FILE))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DeliveryStatus::Delivered);
    let prepared_at = std::fs::metadata(&preview_path)
        .or_else(|_| std::fs::metadata(dir.join(FRAME_FILE)))
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    Some(StoredFrame {
        text,
        preview_png,
        asset_id: None,
        status,
        prepared_at,
    })
}
