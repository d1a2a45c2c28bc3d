//! Palette types
//!
//! The panel supports exactly one palette; see [`Palette::spectra6`].

mod palette;

pub use palette::{Palette, PaletteColor, RESERVED_WIRE_INDEX};
