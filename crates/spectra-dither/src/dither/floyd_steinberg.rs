//! Floyd-Steinberg error diffusion dithering algorithm.
//!
//! Distributes 100% of the quantization error to 4 neighbors.

use image::RgbImage;

use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, image: &mut RgbImage, palette: &Palette, options: &DitherOptions) {
        dither_with_kernel(image, palette, &FLOYD_STEINBERG, options)
    }
}
