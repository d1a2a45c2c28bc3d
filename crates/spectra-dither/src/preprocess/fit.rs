//! Canvas fitting: orientation correction, scale/crop/letterbox and panel
//! mounting rotation.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::api::PipelineError;

/// Panel mounting rotation, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether the logical canvas is transposed relative to the panel.
    #[inline]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<u32> for Rotation {
    type Error = PipelineError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(PipelineError::InvalidRotation(other)),
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// How the photo is placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Scale to cover the canvas, cropping the overflow.
    #[default]
    Fill,
    /// Scale to fit inside the canvas, padding with the background color.
    Fit,
}

impl DisplayMode {
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Fill => "fill",
            DisplayMode::Fit => "fit",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fill" | "cover" | "crop" => Ok(DisplayMode::Fill),
            "fit" | "contain" | "letterbox" => Ok(DisplayMode::Fit),
            other => Err(format!("unknown display mode: {other:?}")),
        }
    }
}

/// EXIF orientation tag (values 1 through 8).
///
/// Describes how the stored pixels must be transformed so that the top of
/// the buffer is visual up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    /// Map an EXIF orientation value; anything outside 1..=8 is `None`.
    pub fn from_exif(value: u32) -> Option<Self> {
        Some(match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270,
            _ => return None,
        })
    }

    /// Transform `image` so that visual up is the top of the buffer.
    pub fn apply(self, image: RgbImage) -> RgbImage {
        match self {
            Orientation::Normal => image,
            Orientation::FlipHorizontal => imageops::flip_horizontal(&image),
            Orientation::Rotate180 => imageops::rotate180(&image),
            Orientation::FlipVertical => imageops::flip_vertical(&image),
            Orientation::Transpose => imageops::flip_horizontal(&imageops::rotate90(&image)),
            Orientation::Rotate90 => imageops::rotate90(&image),
            Orientation::Transverse => imageops::flip_horizontal(&imageops::rotate270(&image)),
            Orientation::Rotate270 => imageops::rotate270(&image),
        }
    }
}

/// Size of a `src_w x src_h` image scaled to fit inside `dst_w x dst_h`.
///
/// The limiting side matches the canvas and the other floors. Aspect ratios
/// are compared by cross-multiplication so equal ratios land exactly on the
/// canvas size.
pub(crate) fn fit_size(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32) {
    let (sw, sh, dw, dh) = (src_w as u64, src_h as u64, dst_w as u64, dst_h as u64);
    let (w, h) = if sw * dh > dw * sh {
        (dw, dw * sh / sw)
    } else {
        (dh * sw / sh, dh)
    };
    (w.max(1) as u32, h.max(1) as u32)
}

/// Centered region `(x, y, width, height)` of the source that covers a
/// `dst_w x dst_h` canvas once scaled.
///
/// The short side is kept whole and the long side is trimmed to the canvas
/// aspect, rounding up so the crop never undershoots it.
pub(crate) fn cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    let (sw, sh, dw, dh) = (src_w as u64, src_h as u64, dst_w as u64, dst_h as u64);
    let (w, h) = if sw * dh > dw * sh {
        ((dw * sh).div_ceil(dh).clamp(1, sw), sh)
    } else {
        (sw, (dh * sw).div_ceil(dw).clamp(1, sh))
    };
    (((sw - w) / 2) as u32, ((sh - h) / 2) as u32, w as u32, h as u32)
}

/// Fit `image` onto a panel of `panel_width x panel_height`.
///
/// Steps: apply `orientation`, then place the photo on a canvas that is
/// transposed for 90/270 mounting. Fill crops the centered region with the
/// canvas aspect and scales only that; fit scales the whole photo inside and
/// letterboxes it. Finally rotate clockwise by `rotation`. The result is
/// always exactly the panel size.
pub fn fit_to_panel(
    image: RgbImage,
    orientation: Orientation,
    panel_width: u32,
    panel_height: u32,
    rotation: Rotation,
    mode: DisplayMode,
    background: Rgb<u8>,
) -> Result<RgbImage, PipelineError> {
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(PipelineError::EmptySource {
            width: src_w,
            height: src_h,
        });
    }

    let image = orientation.apply(image);
    let (src_w, src_h) = image.dimensions();

    let (canvas_w, canvas_h) = if rotation.swaps_axes() {
        (panel_height, panel_width)
    } else {
        (panel_width, panel_height)
    };

    let canvas = match mode {
        DisplayMode::Fill => {
            let (x, y, w, h) = cover_crop(src_w, src_h, canvas_w, canvas_h);
            let cropped = imageops::crop_imm(&image, x, y, w, h).to_image();
            if (w, h) == (canvas_w, canvas_h) {
                cropped
            } else {
                imageops::resize(&cropped, canvas_w, canvas_h, FilterType::Lanczos3)
            }
        }
        DisplayMode::Fit => {
            let (new_w, new_h) = fit_size(src_w, src_h, canvas_w, canvas_h);
            let scaled = if (new_w, new_h) == (src_w, src_h) {
                image
            } else {
                imageops::resize(&image, new_w, new_h, FilterType::Lanczos3)
            };
            let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, background);
            let x = (canvas_w as i64 - new_w as i64) / 2;
            let y = (canvas_h as i64 - new_h as i64) / 2;
            imageops::overlay(&mut canvas, &scaled, x, y);
            canvas
        }
    };

    Ok(match rotation {
        Rotation::Deg0 => canvas,
        Rotation::Deg90 => imageops::rotate90(&canvas),
        Rotation::Deg180 => imageops::rotate180(&canvas),
        Rotation::Deg270 => imageops::rotate270(&canvas),
    })
}
