//! Error diffusion kernel definitions.
//!
//! Each kernel lists the forward neighbors that receive a share of a pixel's
//! quantization residual. Offsets never point backwards in raster order, so
//! diffusion can mutate the image in place.

/// An error diffusion kernel.
///
/// Every neighbor at `(dx, dy)` receives `residual * weight / divisor`.
/// Atkinson distributes less than the full residual.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (always >= 0, and `dx > 0` when `dy == 0`)
    /// - `weight`: numerator over `divisor`
    pub entries: &'static [(i32, i32, u8)],

    /// Denominator shared by all weights.
    pub divisor: u8,
}

/// Atkinson dithering kernel.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Six neighbors at 1/8 each; 6/8 of the residual propagates.
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
};

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
