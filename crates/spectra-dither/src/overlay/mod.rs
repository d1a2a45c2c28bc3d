//! Overlays drawn onto the dithered panel image.
//!
//! Everything here draws with palette colors only, so the output stays a
//! valid dithered image.

mod capture_date;
mod date_stamp;
mod rotated;

pub use capture_date::CaptureDate;
pub use date_stamp::DateStamp;
pub use rotated::RotatedCanvas;
