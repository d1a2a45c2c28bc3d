//! Indexed PNG of a dithered frame for the web preview.

use spectra_dither::{DitheredImage, Palette};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("PNG encode error: {0}")]
pub struct PreviewError(String);

/// Encode as a 4-bit indexed PNG whose PLTE holds the palette colors in
/// index order.
pub fn encode_preview(image: &DitheredImage, palette: &Palette) -> Result<Vec<u8>, PreviewError> {
    let plte: Vec<u8> = palette.colors().iter().flatten().copied().collect();
    let packed = pack_nibbles(image.indices(), image.width());

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Four);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PreviewError(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| PreviewError(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack indices two per byte, high nibble first; odd rows are padded.
fn pack_nibbles(indices: &[u8], width: u32) -> Vec<u8> {
    let width = width as usize;
    if width == 0 {
        return Vec::new();
    }
    let mut packed = Vec::with_capacity(width.div_ceil(2) * (indices.len() / width));
    for row in indices.chunks(width) {
        for pair in row.chunks(2) {
            let high = pair[0] & 0x0f;
            let low = pair.get(1).map_or(0, |v| v & 0x0f);
            packed.push(high << 4 | low);
        }
    }
    packed
}
