//! Preprocessing options and configuration.

use image::Rgb;

use super::fit::{DisplayMode, Rotation};

/// Default panel width in pixels.
pub const PANEL_WIDTH: u32 = 800;
/// Default panel height in pixels.
pub const PANEL_HEIGHT: u32 = 480;

/// Configuration for the steps that run before dithering.
///
/// # Defaults
///
/// - Panel: 800x480, no mounting rotation
/// - Display mode: fill, white background
/// - Saturation and contrast: 1.0 (no change)
///
/// # Example
///
/// ```
/// use spectra_dither::{DisplayMode, PreprocessOptions, Rotation};
///
/// let options = PreprocessOptions::new()
///     .rotation(Rotation::Deg270)
///     .display_mode(DisplayMode::Fit)
///     .saturation(1.3)
///     .contrast(0.9);
/// assert_eq!(options.panel_width, 800);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptions {
    /// Physical panel width.
    pub panel_width: u32,

    /// Physical panel height.
    pub panel_height: u32,

    /// Clockwise mounting rotation of the panel.
    pub rotation: Rotation,

    /// Fill (crop) or fit (letterbox).
    pub display_mode: DisplayMode,

    /// Letterbox color for [`DisplayMode::Fit`].
    pub background: Rgb<u8>,

    /// Saturation multiplier (1.0 = no change).
    pub saturation: f32,

    /// Contrast multiplier (1.0 = no change).
    pub contrast: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            panel_width: PANEL_WIDTH,
            panel_height: PANEL_HEIGHT,
            rotation: Rotation::Deg0,
            display_mode: DisplayMode::Fill,
            background: Rgb([255, 255, 255]),
            saturation: 1.0,
            contrast: 1.0,
        }
    }
}

impl PreprocessOptions {
    /// Create new preprocessing options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the physical panel size.
    #[inline]
    pub fn panel(mut self, width: u32, height: u32) -> Self {
        self.panel_width = width;
        self.panel_height = height;
        self
    }

    /// Set the mounting rotation.
    #[inline]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the display mode.
    #[inline]
    pub fn display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    /// Set the letterbox background color.
    #[inline]
    pub fn background(mut self, color: Rgb<u8>) -> Self {
        self.background = color;
        self
    }

    /// Set saturation multiplier.
    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    /// Set contrast multiplier.
    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    /// Size of the canvas the photo is composed on, before mounting
    /// rotation is applied.
    pub fn logical_size(&self) -> (u32, u32) {
        if self.rotation.swaps_axes() {
            (self.panel_height, self.panel_width)
        } else {
            (self.panel_width, self.panel_height)
        }
    }
}
