//! Date stamp rendering.

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use image::RgbImage;

use super::RotatedCanvas;
use crate::palette::PaletteColor;
use crate::preprocess::Rotation;

const GLYPH_WIDTH: u32 = 10;
const GLYPH_HEIGHT: u32 = 20;

/// Bottom-right date label drawn onto the mounted panel image.
///
/// Placement is computed on the upright canvas, so for 90/270 mounts the
/// label sits in the corner the viewer sees as bottom-right.
///
/// ```
/// use image::RgbImage;
/// use spectra_dither::{DateStamp, Palette, Rotation};
///
/// let palette = Palette::spectra6();
/// let mut panel = RgbImage::from_pixel(800, 480, palette.color(3));
/// DateStamp::new().draw(&mut panel, Rotation::Deg0, "2024-05-01");
/// assert!(panel.pixels().all(|p| palette.contains(p.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateStamp {
    /// Distance from the label box to the right and bottom edges.
    pub margin: u32,
    /// Space between text and box edge.
    pub padding: u32,
    pub text: PaletteColor,
    pub background: PaletteColor,
}

impl Default for DateStamp {
    fn default() -> Self {
        Self {
            margin: 10,
            padding: 4,
            text: PaletteColor::Black,
            background: PaletteColor::White,
        }
    }
}

impl DateStamp {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    #[inline]
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Label box in upright canvas coordinates.
    pub fn bounds(&self, canvas: Size, label: &str) -> Rectangle {
        let box_size = Size::new(
            label.chars().count() as u32 * GLYPH_WIDTH + 2 * self.padding,
            GLYPH_HEIGHT + 2 * self.padding,
        );
        let x = canvas.width as i64 - self.margin as i64 - box_size.width as i64;
        let y = canvas.height as i64 - self.margin as i64 - box_size.height as i64;
        Rectangle::new(Point::new(x as i32, y as i32), box_size)
    }

    /// Draw `label` onto a panel image mounted with `rotation`.
    pub fn draw(&self, image: &mut RgbImage, rotation: Rotation, label: &str) {
        if label.is_empty() {
            return;
        }
        let mut canvas = RotatedCanvas::new(image, rotation);
        let bounds = self.bounds(canvas.size(), label);

        let _ = bounds
            .into_styled(PrimitiveStyle::with_fill(to_rgb888(self.background)))
            .draw(&mut canvas);

        let style = MonoTextStyle::new(&FONT_10X20, to_rgb888(self.text));
        let origin = bounds.top_left + Point::new(self.padding as i32, self.padding as i32);
        let _ = Text::with_baseline(label, origin, style, Baseline::Top).draw(&mut canvas);
    }
}

fn to_rgb888(color: PaletteColor) -> Rgb888 {
    let [r, g, b] = color.rgb().0;
    Rgb888::new(r, g, b)
}
