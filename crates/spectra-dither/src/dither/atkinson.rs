//! Atkinson error diffusion dithering algorithm.
//!
//! Atkinson dithering distributes only 75% of the quantization error (6/8).
//! The dropped quarter keeps small palettes from bleeding, which suits the
//! six-color panel.

use image::RgbImage;

use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, ATKINSON};

/// Atkinson error diffusion dithering.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Each neighbor receives 1/8 of the residual, scaled by
/// [`DitherOptions::strength`].
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(&self, image: &mut RgbImage, palette: &Palette, options: &DitherOptions) {
        dither_with_kernel(image, palette, &ATKINSON, options)
    }
}
