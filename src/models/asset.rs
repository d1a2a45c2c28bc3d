use chrono::{DateTime, Utc};
use serde::Serialize;

/// A photo in the configured album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Album source asset id
    pub id: String,
    /// Capture time reported by the album source
    pub taken_at: Option<DateTime<Utc>>,
    /// Path of the original file on the album server
    pub original_path: String,
}

/// File family of an original, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Standard,
    /// Camera raw formats (TIFF-structured containers).
    RawSensor,
    Heic,
}

const RAW_EXTENSIONS: &[&str] = &["raw", "dng", "arw", "cr2", "nef"];

impl MediaKind {
    pub fn from_path(path: &str) -> Self {
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if RAW_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::RawSensor
        } else if ext == "heic" {
            MediaKind::Heic
        } else {
            MediaKind::Standard
        }
    }
}

impl Asset {
    pub fn new(id: impl Into<String>, original_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            taken_at: None,
            original_path: original_path.into(),
        }
    }

    pub fn taken_at(mut self, at: DateTime<Utc>) -> Self {
        self.taken_at = Some(at);
        self
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_path(&self.original_path)
    }
}
