//! Record of photos already shown from the current album.
//!
//! Plain text: the album name on the first line, then one asset id per
//! line. A header that does not match the current album restarts the log.
//! IO failures are logged and treated as an empty history.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const TRACKING_FILE: &str = "tracking.txt";

#[derive(Debug, Clone)]
pub struct TrackingLog {
    path: PathBuf,
}

impl TrackingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log stored as `tracking.txt` in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TRACKING_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids delivered from `album`. Restarts the log when it belongs to a
    /// different album.
    pub fn delivered(&self, album: &str) -> HashSet<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                tracing::error!(error = %e, path = %self.path.display(), "Failed to read tracking log");
                return HashSet::new();
            }
        };

        let mut lines = content.lines();
        if lines.next().map(str::trim) != Some(album) {
            tracing::info!(album = %album, "Tracking log belongs to another album, restarting");
            self.reset(album);
            return HashSet::new();
        }
        lines
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Truncate to just the album header.
    pub fn reset(&self, album: &str) {
        if let Err(e) = fs::write(&self.path, format!("{album}\n")) {
            tracing::error!(error = %e, path = %self.path.display(), "Failed to reset tracking log");
        }
    }

    /// Append a delivered id, restarting first if the header is stale.
    pub fn append(&self, album: &str, asset_id: &str) {
        let header_ok = fs::read_to_string(&self.path)
            .ok()
            .is_some_and(|c| c.lines().next().map(str::trim) == Some(album));
        if !header_ok {
            self.reset(album);
        }
        let result = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{asset_id}"));
        if let Err(e) = result {
            tracing::error!(error = %e, asset_id = %asset_id, "Failed to append to tracking log");
        }
    }
}
