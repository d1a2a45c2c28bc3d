//! A draw target that maps upright (logical) coordinates onto a panel
//! image that has been rotated for mounting.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use image::{Rgb, RgbImage};

use crate::preprocess::Rotation;

/// Draws onto a mounted-orientation panel image using logical coordinates.
///
/// The logical canvas is the panel transposed for 90/270 mounts. A logical
/// pixel `(x, y)` lands where the clockwise mounting rotation put it, so text
/// drawn here reads upright on the physical frame. Pixels outside the canvas
/// are dropped.
pub struct RotatedCanvas<'a> {
    image: &'a mut RgbImage,
    rotation: Rotation,
    logical_width: u32,
    logical_height: u32,
}

impl<'a> RotatedCanvas<'a> {
    pub fn new(image: &'a mut RgbImage, rotation: Rotation) -> Self {
        let (w, h) = image.dimensions();
        let (logical_width, logical_height) = if rotation.swaps_axes() { (h, w) } else { (w, h) };
        Self {
            image,
            rotation,
            logical_width,
            logical_height,
        }
    }

    /// Panel coordinates of logical pixel `(x, y)`.
    fn map(&self, x: u32, y: u32) -> (u32, u32) {
        let (lw, lh) = (self.logical_width, self.logical_height);
        match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (lh - 1 - y, x),
            Rotation::Deg180 => (lw - 1 - x, lh - 1 - y),
            Rotation::Deg270 => (y, lw - 1 - x),
        }
    }
}

impl DrawTarget for RotatedCanvas<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x >= self.logical_width || y >= self.logical_height {
                continue;
            }
            let (px, py) = self.map(x, y);
            self.image
                .put_pixel(px, py, Rgb([color.r(), color.g(), color.b()]));
        }
        Ok(())
    }
}

impl OriginDimensions for RotatedCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.logical_width, self.logical_height)
    }
}
