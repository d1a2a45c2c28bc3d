#![allow(clippy::module_inception)]

//! spectra-dither: photo rendering for six-color e-paper panels
//!
//! Turns a decoded photo into the hex transfer frame a panel client
//! downloads: fit to the panel, enhance, error-diffuse onto the fixed
//! palette, stamp the capture date, pack two pixels per byte.
//!
//! # Quick Start
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use spectra_dither::{CaptureDate, FrameRenderer, Orientation};
//!
//! let renderer = FrameRenderer::new().panel(16, 8).saturation(1.2);
//! let photo = RgbImage::from_pixel(40, 30, Rgb([200, 180, 40]));
//! let frame = renderer
//!     .render(photo, Orientation::Normal, &CaptureDate::parse("2022:08:01 12:00:00"))
//!     .unwrap();
//!
//! assert_eq!(frame.image.indices().len(), 16 * 8);
//! assert!(frame.text.starts_with(|c: char| c.is_ascii_hexdigit()));
//! ```
//!
//! # Palette
//!
//! Six colors in fixed order: black, white, yellow, red, blue, green.
//! Matching is plain squared distance in sRGB with ties going to the lower
//! index. On the wire, indices 4 and 5 are sent as 5 and 6.
//!
//! # Pipeline
//!
//! ```text
//! decoded photo + EXIF orientation
//!     |
//!     v
//! [Fit]          orient, scale (fill/fit, Lanczos3), mount rotation
//!     |
//!     v
//! [Enhance]      saturation around pixel luma, contrast around mean luma
//!     |
//!     v
//! [Dither]       Atkinson or Floyd-Steinberg, raster order, scaled by strength
//!     |
//!     v
//! [Date stamp]   palette-colored label, upright on the mounted panel
//!     |
//!     v
//! [Encode]       wire remap, nibble packing, hex text
//! ```
//!
//! Every stage after dithering writes palette colors only, so the final
//! image can be indexed exactly.

pub mod api;
pub mod dither;
pub mod output;
pub mod overlay;
pub mod palette;
pub mod preprocess;

#[cfg(test)]
mod domain_tests;

pub use api::{FrameRenderer, PipelineError, RenderedFrame};
pub use dither::{
    dither_image, Atkinson, Dither, DitherAlgorithm, DitherOptions, FloydSteinberg,
    UnknownAlgorithm,
};
pub use output::{decode_frame, encode_frame, frame_len, DitheredImage, FrameError};
pub use overlay::{CaptureDate, DateStamp, RotatedCanvas};
pub use palette::{Palette, PaletteColor};
pub use preprocess::{DisplayMode, Orientation, PreprocessOptions, Preprocessor, Rotation};
