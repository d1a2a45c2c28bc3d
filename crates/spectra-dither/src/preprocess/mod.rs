//! Image preprocessing before dithering.
//!
//! The pipeline, in order:
//!
//! 1. **Orientation** - apply the EXIF orientation so visual up is the top row
//! 2. **Fit** - scale into the logical canvas (transposed for 90/270 mounts),
//!    cropping in fill mode or letterboxing in fit mode, Lanczos3 resampling
//! 3. **Mounting rotation** - rotate clockwise onto the physical panel
//! 4. **Saturation**, then **contrast**
//!
//! # Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use spectra_dither::{DisplayMode, Orientation, PreprocessOptions, Preprocessor, Rotation};
//!
//! let options = PreprocessOptions::new()
//!     .panel(80, 48)
//!     .rotation(Rotation::Deg90)
//!     .display_mode(DisplayMode::Fit)
//!     .saturation(1.3)
//!     .contrast(0.9);
//!
//! let photo = RgbImage::from_pixel(300, 200, Rgb([120, 80, 40]));
//! let canvas = Preprocessor::new(options).process(photo, Orientation::Normal).unwrap();
//! assert_eq!(canvas.dimensions(), (80, 48));
//! ```

mod enhance;
mod fit;
mod options;
mod preprocessor;

pub use enhance::{adjust_contrast, adjust_saturation, enhance};
pub use fit::{fit_to_panel, DisplayMode, Orientation, Rotation};
pub use options::{PreprocessOptions, PANEL_HEIGHT, PANEL_WIDTH};
pub use preprocessor::Preprocessor;
