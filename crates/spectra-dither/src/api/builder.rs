//! FrameRenderer builder: the single entry point that turns a decoded photo
//! into a panel frame.

use image::{Rgb, RgbImage};

use super::PipelineError;
use crate::dither::{dither_image, DitherAlgorithm, DitherOptions};
use crate::output::{encode_frame, DitheredImage};
use crate::overlay::{CaptureDate, DateStamp};
use crate::palette::Palette;
use crate::preprocess::{DisplayMode, Orientation, PreprocessOptions, Preprocessor, Rotation};

/// Full photo-to-frame pipeline with fluent configuration.
///
/// Steps: fit to the panel, enhance, dither, stamp the capture date, encode.
/// [`render()`](Self::render) takes `&self` so one renderer can be reused
/// for many photos.
///
/// # Example
///
/// ```
/// use image::{Rgb, RgbImage};
/// use spectra_dither::{CaptureDate, DitherAlgorithm, FrameRenderer, Orientation, Rotation};
///
/// let renderer = FrameRenderer::new()
///     .panel(32, 20)
///     .rotation(Rotation::Deg90)
///     .algorithm(DitherAlgorithm::FloydSteinberg)
///     .strength(0.8);
///
/// let photo = RgbImage::from_pixel(64, 48, Rgb([120, 160, 200]));
/// let frame = renderer
///     .render(photo, Orientation::Normal, &CaptureDate::Absent)
///     .unwrap();
///
/// assert_eq!((frame.image.width(), frame.image.height()), (32, 20));
/// assert_eq!(frame.text.split(',').count(), 16 * 20);
/// ```
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    palette: Palette,
    preprocess: PreprocessOptions,
    algorithm: DitherAlgorithm,
    dither_opts: DitherOptions,
    date_stamp: Option<DateStamp>,
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Dithered panel image in mounted orientation.
    pub image: DitheredImage,
    /// Transfer text for the panel client.
    pub text: String,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRenderer {
    /// Renderer for the 800x480 panel: Atkinson at full strength, fill mode,
    /// no rotation or enhancement, date stamp enabled.
    pub fn new() -> Self {
        Self {
            palette: Palette::spectra6(),
            preprocess: PreprocessOptions::default(),
            algorithm: DitherAlgorithm::default(),
            dither_opts: DitherOptions::default(),
            date_stamp: Some(DateStamp::default()),
        }
    }

    #[inline]
    pub fn panel(mut self, width: u32, height: u32) -> Self {
        self.preprocess = self.preprocess.panel(width, height);
        self
    }

    #[inline]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.preprocess = self.preprocess.rotation(rotation);
        self
    }

    #[inline]
    pub fn display_mode(mut self, mode: DisplayMode) -> Self {
        self.preprocess = self.preprocess.display_mode(mode);
        self
    }

    #[inline]
    pub fn background(mut self, color: Rgb<u8>) -> Self {
        self.preprocess = self.preprocess.background(color);
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.preprocess = self.preprocess.saturation(factor);
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.preprocess = self.preprocess.contrast(factor);
        self
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: DitherAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Error diffusion strength (0.0 = nearest color only).
    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.dither_opts = self.dither_opts.strength(strength);
        self
    }

    /// Replace the date stamp style, or disable it with `None`.
    #[inline]
    pub fn date_stamp(mut self, stamp: Option<DateStamp>) -> Self {
        self.date_stamp = stamp;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn preprocess_options(&self) -> &PreprocessOptions {
        &self.preprocess
    }

    pub fn algorithm_used(&self) -> DitherAlgorithm {
        self.algorithm
    }

    /// Run the pipeline on a decoded photo.
    pub fn render(
        &self,
        image: RgbImage,
        orientation: Orientation,
        capture_date: &CaptureDate,
    ) -> Result<RenderedFrame, PipelineError> {
        let mut canvas = Preprocessor::new(self.preprocess.clone()).process(image, orientation)?;
        dither_image(&mut canvas, &self.palette, self.algorithm, &self.dither_opts);

        if let (Some(stamp), Some(label)) = (self.date_stamp, capture_date.label()) {
            stamp.draw(&mut canvas, self.preprocess.rotation, &label);
        }

        let image = DitheredImage::from_rgb(&canvas, &self.palette);
        let text = encode_frame(&image, &self.palette);
        Ok(RenderedFrame { image, text })
    }
}
