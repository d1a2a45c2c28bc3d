//! Pipeline output: palette-indexed images and the device transfer frame.
//!
//! [`DitheredImage`] holds one palette index per pixel. The [`frame`]
//! functions pack it into the hex text the panel client downloads, and
//! parse that text back.

mod dithered_image;
pub mod frame;

pub use dithered_image::DitheredImage;
pub use frame::{decode_frame, encode_frame, frame_len, FrameError};
