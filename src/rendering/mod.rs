//! Photo decoding and rendering glue around `spectra_dither`.

pub mod decode;
pub mod preview;

pub use decode::{decode_photo, read_metadata, DecodeError, DecodedPhoto};
pub use preview::{encode_preview, PreviewError};

use spectra_dither::{FrameRenderer, PipelineError, RenderedFrame};
use thiserror::Error;

use crate::models::MediaKind;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Preview(#[from] PreviewError),
}

/// A finished frame and its preview image.
#[derive(Debug, Clone)]
pub struct RenderedPhoto {
    pub frame: RenderedFrame,
    pub preview_png: Vec<u8>,
}

/// Decode an original and run it through `renderer`. CPU-bound.
pub fn render_photo(
    bytes: &[u8],
    kind: MediaKind,
    renderer: &FrameRenderer,
) -> Result<RenderedPhoto, RenderError> {
    let photo = decode_photo(bytes, kind)?;
    tracing::debug!(
        width = photo.image.width(),
        height = photo.image.height(),
        orientation = ?photo.orientation,
        "Decoded photo"
    );
    let frame = renderer.render(photo.image, photo.orientation, &photo.capture_date)?;
    let preview_png = encode_preview(&frame.image, renderer.palette())?;
    Ok(RenderedPhoto { frame, preview_png })
}
