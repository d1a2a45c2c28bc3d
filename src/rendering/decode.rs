//! Turn original file bytes into pixels plus the metadata the frame needs.

use exif::{In, Tag, Value};
use image::{ImageFormat, RgbImage};
use spectra_dither::{CaptureDate, Orientation};
use std::io::Cursor;
use thiserror::Error;

use crate::models::MediaKind;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(&'static str),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// A decoded photo, not yet oriented.
#[derive(Debug, Clone)]
pub struct DecodedPhoto {
    pub image: RgbImage,
    pub orientation: Orientation,
    pub capture_date: CaptureDate,
}

/// Decode `bytes` according to `kind`.
///
/// Camera raw files are read through their TIFF container, which yields the
/// embedded primary image. Missing or corrupt EXIF is not an error.
pub fn decode_photo(bytes: &[u8], kind: MediaKind) -> Result<DecodedPhoto, DecodeError> {
    let image = match kind {
        MediaKind::Heic => return Err(DecodeError::UnsupportedFormat("heic")),
        MediaKind::RawSensor => image::load_from_memory_with_format(bytes, ImageFormat::Tiff)?,
        MediaKind::Standard => image::load_from_memory(bytes)?,
    };
    let (orientation, capture_date) = read_metadata(bytes);
    Ok(DecodedPhoto {
        image: image.into_rgb8(),
        orientation,
        capture_date,
    })
}

/// EXIF orientation and capture date, with defaults for anything missing.
pub fn read_metadata(bytes: &[u8]) -> (Orientation, CaptureDate) {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            tracing::debug!(error = %e, "No usable EXIF data");
            return (Orientation::Normal, CaptureDate::Absent);
        }
    };

    let orientation = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .and_then(Orientation::from_exif)
        .unwrap_or_default();

    let ascii = |tag: Tag| -> Option<String> {
        match &exif.get_field(tag, In::PRIMARY)?.value {
            Value::Ascii(parts) => parts
                .first()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    };
    let candidates = [
        ascii(Tag::DateTimeOriginal),
        ascii(Tag::DateTimeDigitized),
        ascii(Tag::DateTime),
    ];
    let capture_date = CaptureDate::from_candidates(candidates.iter().map(|c| c.as_deref()));

    (orientation, capture_date)
}
