//! Test fixtures and constants.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use inkframe::models::{AppConfig, Asset, PanelSpec};
use inkframe::services::InMemoryAlbum;
use std::io::Cursor;

/// Album names
pub mod albums {
    /// Album every test config points at
    pub const TRIP: &str = "Trip";

    /// Album that exists but has no photos
    pub const EMPTY: &str = "Empty";
}

/// Small panel keeps rendering fast
pub const TEST_PANEL: PanelSpec = PanelSpec {
    width: 32,
    height: 16,
};

/// Config for [`albums::TRIP`] in random order without rotation
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.immich.url = "http://immich.invalid".to_string();
    config.immich.album = albums::TRIP.to_string();
    config.immich.rotation = 0;
    config.immich.image_order = "random".to_string();
    config.immich.dithering_method = "atkinson".to_string();
    config.immich.wakeup_interval = 60;
    config
}

/// A solid-color PNG
pub fn png_photo(color: [u8; 3]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(48, 32, Rgb(color)))
        .write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode fixture");
    buf.into_inner()
}

/// Distinct colors so every photo renders to a different frame
pub const PHOTO_COLORS: [[u8; 3]; 4] = [[255, 0, 0], [0, 0, 255], [0, 255, 0], [255, 255, 0]];

/// In-memory album with `count` photos named `p1`, `p2`, ...
pub async fn trip_album(count: usize) -> std::sync::Arc<InMemoryAlbum> {
    let source = std::sync::Arc::new(InMemoryAlbum::new());
    for i in 0..count {
        let id = format!("p{}", i + 1);
        let path = format!("/library/{id}.png");
        source
            .insert(albums::TRIP, Asset::new(id, path), png_photo(PHOTO_COLORS[i % 4]))
            .await;
    }
    source
}
