//! Saturation and contrast adjustment.
//!
//! Both operations blend each pixel with a "degenerate" image and a factor:
//! `out = degenerate + factor * (pixel - degenerate)`, truncated and clamped
//! to `[0, 255]`. For saturation the degenerate image is the pixel's own
//! luma grey; for contrast it is the rounded mean luma of the whole image.
//! A factor of 1.0 leaves the image unchanged. Factors are not clamped.

use image::RgbImage;

/// ITU-R 601 luma in 16-bit fixed point, rounded.
#[inline]
pub(crate) fn luma(rgb: [u8; 3]) -> u8 {
    let l = (rgb[0] as u32 * 19595 + rgb[1] as u32 * 38470 + rgb[2] as u32 * 7471 + 0x8000) >> 16;
    l as u8
}

#[inline]
fn blend(degenerate: f32, value: u8, factor: f32) -> u8 {
    (degenerate + factor * (value as f32 - degenerate)).clamp(0.0, 255.0) as u8
}

/// Scale color saturation by `factor` in place.
pub fn adjust_saturation(image: &mut RgbImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    for pixel in image.pixels_mut() {
        let grey = luma(pixel.0) as f32;
        for c in 0..3 {
            pixel.0[c] = blend(grey, pixel.0[c], factor);
        }
    }
}

/// Scale contrast around the image's mean luma by `factor` in place.
pub fn adjust_contrast(image: &mut RgbImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    let mean = mean_luma(image) as f32;
    for pixel in image.pixels_mut() {
        for c in 0..3 {
            pixel.0[c] = blend(mean, pixel.0[c], factor);
        }
    }
}

/// Mean luma, rounded half up. Zero for an empty image.
pub(crate) fn mean_luma(image: &RgbImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = image.pixels().map(|p| luma(p.0) as u64).sum();
    ((sum as f64 / count as f64) + 0.5) as u8
}

/// Apply saturation, then contrast.
pub fn enhance(image: &mut RgbImage, saturation: f32, contrast: f32) {
    adjust_saturation(image, saturation);
    adjust_contrast(image, contrast);
}
