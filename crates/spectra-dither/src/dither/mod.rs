//! Error diffusion dithering onto the six-color palette.
//!
//! # Algorithms
//!
//! - **Atkinson**: 6/8 error propagation (default)
//! - **Floyd-Steinberg**: full error propagation
//!
//! Both walk the image in raster order (left to right, top to bottom) and
//! write the quantized color back into the buffer as they go, so residuals
//! pushed onto later pixels are seen when those pixels are visited.
//!
//! # Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use spectra_dither::{Atkinson, Dither, DitherOptions, Palette};
//!
//! let palette = Palette::spectra6();
//! let mut image = RgbImage::from_pixel(4, 4, Rgb([128, 128, 128]));
//! Atkinson.dither(&mut image, &palette, &DitherOptions::new());
//! assert!(image.pixels().all(|p| palette.contains(p.0)));
//! ```

mod atkinson;
mod floyd_steinberg;
mod kernel;
mod options;

use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage};

pub use atkinson::Atkinson;
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::*;
pub use options::DitherOptions;

use crate::palette::Palette;

/// Dither algorithm selection.
///
/// Parsed from the configuration names `atkinson` and `floyd-steinberg`.
/// Use [`DitherAlgorithm::parse_or_default`] when an unknown name should
/// fall back to Atkinson instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherAlgorithm {
    /// Atkinson error diffusion (75% propagation).
    #[default]
    Atkinson,

    /// Floyd-Steinberg error diffusion (100% propagation).
    FloydSteinberg,
}

impl DitherAlgorithm {
    /// Configuration name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::Atkinson => "atkinson",
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
        }
    }

    /// Parse a configuration name, falling back to the default algorithm.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    fn kernel(self) -> &'static Kernel {
        match self {
            DitherAlgorithm::Atkinson => &ATKINSON,
            DitherAlgorithm::FloydSteinberg => &FLOYD_STEINBERG,
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a dither algorithm name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dithering method: {:?}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for DitherAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atkinson" => Ok(DitherAlgorithm::Atkinson),
            "floyd-steinberg" | "floyd_steinberg" | "floydsteinberg" => {
                Ok(DitherAlgorithm::FloydSteinberg)
            }
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Trait for error diffusion dithering algorithms.
///
/// Implementors quantize every pixel of `image` to the nearest palette color
/// in place. Afterwards every pixel equals one of the palette entries.
pub trait Dither {
    /// Dither `image` in place.
    fn dither(&self, image: &mut RgbImage, palette: &Palette, options: &DitherOptions);
}

/// Dither with the kernel selected by `algorithm`.
pub fn dither_image(
    image: &mut RgbImage,
    palette: &Palette,
    algorithm: DitherAlgorithm,
    options: &DitherOptions,
) {
    dither_with_kernel(image, palette, algorithm.kernel(), options);
}

/// Core error diffusion loop shared by all algorithms.
///
/// For every pixel in raster order: quantize, write the palette color back,
/// then add `residual * weight / divisor * strength` to each in-bounds
/// neighbor, clamped to `[0, 255]` and truncated. Shares that would land
/// outside the image are dropped without renormalization.
pub(crate) fn dither_with_kernel(
    image: &mut RgbImage,
    palette: &Palette,
    kernel: &Kernel,
    options: &DitherOptions,
) {
    let (width, height) = image.dimensions();
    let (width, height) = (width as i64, height as i64);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            let old = image.get_pixel(x as u32, y as u32).0;
            let idx = palette.find_nearest(old);
            let new = palette.color(idx).0;
            image.put_pixel(x as u32, y as u32, palette.color(idx));

            let residual = [
                old[0] as f32 - new[0] as f32,
                old[1] as f32 - new[1] as f32,
                old[2] as f32 - new[2] as f32,
            ];
            if residual == [0.0; 3] || options.strength == 0.0 {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x + dx as i64;
                let ny = y + dy as i64;
                if nx < 0 || nx >= width || ny >= height {
                    continue;
                }

                let share = weight as f32 / divisor * options.strength;
                diffuse(image.get_pixel_mut(nx as u32, ny as u32), residual, share);
            }
        }
    }
}

#[inline]
fn diffuse(target: &mut Rgb<u8>, residual: [f32; 3], share: f32) {
    for c in 0..3 {
        let value = target.0[c] as f32 + residual[c] * share;
        target.0[c] = value.clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) * 127 / (width + height).max(1)) as u8,
            ])
        })
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "atkinson".parse::<DitherAlgorithm>(),
            Ok(DitherAlgorithm::Atkinson)
        );
        assert_eq!(
            "floyd-steinberg".parse::<DitherAlgorithm>(),
            Ok(DitherAlgorithm::FloydSteinberg)
        );
        assert_eq!(
            " Floyd-Steinberg ".parse::<DitherAlgorithm>(),
            Ok(DitherAlgorithm::FloydSteinberg)
        );
        assert!("ordered".parse::<DitherAlgorithm>().is_err());
    }

    #[test]
    fn test_unknown_name_falls_back_to_atkinson() {
        assert_eq!(
            DitherAlgorithm::parse_or_default("bayer"),
            DitherAlgorithm::Atkinson
        );
        assert_eq!(DitherAlgorithm::parse_or_default(""), DitherAlgorithm::Atkinson);
    }

    #[test]
    fn test_display_round_trips_name() {
        for algo in [DitherAlgorithm::Atkinson, DitherAlgorithm::FloydSteinberg] {
            assert_eq!(algo.to_string().parse::<DitherAlgorithm>(), Ok(algo));
        }
    }

    #[test]
    fn test_output_only_palette_colors() {
        let palette = Palette::spectra6();
        for algo in [DitherAlgorithm::Atkinson, DitherAlgorithm::FloydSteinberg] {
            for strength in [0.0, 0.5, 1.0, 1.7] {
                let mut image = gradient(37, 23);
                dither_image(
                    &mut image,
                    &palette,
                    algo,
                    &DitherOptions::new().strength(strength),
                );
                assert!(
                    image.pixels().all(|p| palette.contains(p.0)),
                    "{algo} at strength {strength} left a non-palette pixel"
                );
            }
        }
    }

    #[test]
    fn test_zero_strength_is_nearest_color() {
        let palette = Palette::spectra6();
        let source = gradient(16, 9);
        let mut image = source.clone();
        dither_image(
            &mut image,
            &palette,
            DitherAlgorithm::FloydSteinberg,
            &DitherOptions::new().strength(0.0),
        );
        for (src, out) in source.pixels().zip(image.pixels()) {
            assert_eq!(out.0, palette.color(palette.find_nearest(src.0)).0);
        }
    }

    #[test]
    fn test_palette_image_is_unchanged() {
        let palette = Palette::spectra6();
        let source = RgbImage::from_fn(12, 6, |x, y| palette.color(((x + y) % 6) as u8));
        let mut image = source.clone();
        dither_image(
            &mut image,
            &palette,
            DitherAlgorithm::Atkinson,
            &DitherOptions::new(),
        );
        assert_eq!(image, source);
    }

    #[test]
    fn test_deterministic() {
        let palette = Palette::spectra6();
        let mut a = gradient(20, 20);
        let mut b = gradient(20, 20);
        let opts = DitherOptions::new().strength(0.8);
        dither_image(&mut a, &palette, DitherAlgorithm::Atkinson, &opts);
        dither_image(&mut b, &palette, DitherAlgorithm::Atkinson, &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_bounds_shares_are_dropped() {
        // In a single row only the two right-hand Atkinson entries land
        // inside the image.
        let palette = Palette::spectra6();
        let mut image = RgbImage::from_pixel(3, 1, Rgb([100, 100, 100]));
        let mut expected = image.clone();
        dither_with_kernel(&mut expected, &palette, &ATKINSON, &DitherOptions::new());
        dither_with_kernel(
            &mut image,
            &palette,
            &Kernel {
                entries: &[(1, 0, 1), (2, 0, 1)],
                divisor: 8,
            },
            &DitherOptions::new(),
        );
        assert_eq!(image, expected);
    }

    #[test]
    fn test_diffuse_truncates() {
        // 10 + (-5 * 7/16) = 7.8125
        let mut px = Rgb([10, 10, 10]);
        diffuse(&mut px, [-5.0, -5.0, -5.0], 7.0 / 16.0);
        assert_eq!(px.0, [7, 7, 7]);

        // 10 + 12.5 = 22.5
        let mut px = Rgb([10, 20, 30]);
        diffuse(&mut px, [100.0, 0.0, -100.0], 1.0 / 8.0);
        assert_eq!(px.0, [22, 20, 17]);
    }

    #[test]
    fn test_diffuse_clamps() {
        let mut px = Rgb([250, 5, 128]);
        diffuse(&mut px, [200.0, -200.0, 0.0], 0.5);
        assert_eq!(px.0, [255, 0, 128]);
    }

    #[test]
    fn test_strength_scales_share() {
        let mut full = Rgb([100, 100, 100]);
        let mut half = Rgb([100, 100, 100]);
        diffuse(&mut full, [80.0; 3], 1.0 / 8.0);
        diffuse(&mut half, [80.0; 3], 1.0 / 8.0 * 0.5);
        assert_eq!(full.0, [110, 110, 110]);
        assert_eq!(half.0, [105, 105, 105]);
    }
}
