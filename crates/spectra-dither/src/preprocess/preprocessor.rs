//! Runs the steps before dithering: canvas fitting, then color enhancement.

use image::RgbImage;

use crate::api::PipelineError;

use super::enhance::enhance;
use super::fit::{fit_to_panel, Orientation};
use super::PreprocessOptions;

/// Applies [`PreprocessOptions`] to decoded photos.
///
/// # Example
///
/// ```
/// use image::{Rgb, RgbImage};
/// use spectra_dither::{Orientation, PreprocessOptions, Preprocessor};
///
/// let pre = Preprocessor::new(PreprocessOptions::new().panel(40, 24));
/// let out = pre
///     .process(RgbImage::from_pixel(100, 50, Rgb([90, 90, 90])), Orientation::Normal)
///     .unwrap();
/// assert_eq!(out.dimensions(), (40, 24));
/// ```
#[derive(Debug, Clone)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Fit `image` to the panel and enhance it.
    ///
    /// The result is panel-sized and already rotated for mounting.
    pub fn process(
        &self,
        image: RgbImage,
        orientation: Orientation,
    ) -> Result<RgbImage, PipelineError> {
        let opts = &self.options;
        let mut canvas = fit_to_panel(
            image,
            orientation,
            opts.panel_width,
            opts.panel_height,
            opts.rotation,
            opts.display_mode,
            opts.background,
        )?;
        enhance(&mut canvas, opts.saturation, opts.contrast);
        Ok(canvas)
    }
}
