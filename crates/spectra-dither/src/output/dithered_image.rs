//! Palette-indexed image.

use image::RgbImage;

use crate::palette::Palette;

/// One palette index per pixel, row-major.
///
/// # Example
///
/// ```
/// use image::{Rgb, RgbImage};
/// use spectra_dither::{DitheredImage, Palette};
///
/// let palette = Palette::spectra6();
/// let rgb = RgbImage::from_pixel(3, 2, Rgb([250, 250, 250]));
/// let image = DitheredImage::from_rgb(&rgb, &palette);
///
/// assert_eq!(image.indices(), &[1; 6]);
/// assert_eq!(image.to_rgb(&palette), RgbImage::from_pixel(3, 2, Rgb([255, 255, 255])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitheredImage {
    indices: Vec<u8>,
    width: u32,
    height: u32,
}

impl DitheredImage {
    /// Wrap palette indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length must match {}x{}",
            width,
            height
        );
        Self {
            indices,
            width,
            height,
        }
    }

    /// Index every pixel by its nearest palette color.
    ///
    /// On an already dithered image this is an exact lookup.
    pub fn from_rgb(image: &RgbImage, palette: &Palette) -> Self {
        let indices = image.pixels().map(|p| palette.find_nearest(p.0)).collect();
        Self::new(indices, image.width(), image.height())
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.indices[y as usize * self.width as usize + x as usize]
    }

    /// Pixel count per palette index.
    pub fn histogram(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for &idx in &self.indices {
            if let Some(slot) = counts.get_mut(idx as usize) {
                *slot += 1;
            }
        }
        counts
    }

    /// Expand back to RGB.
    pub fn to_rgb(&self, palette: &Palette) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| palette.color(self.get(x, y)))
    }
}
