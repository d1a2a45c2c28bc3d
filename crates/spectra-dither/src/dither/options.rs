//! Dithering options and configuration.

/// Configuration options for error diffusion dithering.
///
/// # Defaults
///
/// - Strength: 1.0 (full kernel weights)
///
/// # Example
///
/// ```
/// use spectra_dither::DitherOptions;
///
/// let options = DitherOptions::new().strength(0.8);
/// assert_eq!(options.strength, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Scale applied to every diffused share of the residual.
    ///
    /// - 0.0 = plain nearest-color quantization (no diffusion)
    /// - 1.0 = full kernel weights
    ///
    /// Values in between interpolate linearly. Values outside `[0, 1]` are
    /// not rejected.
    pub strength: f32,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self { strength: 1.0 }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffusion strength.
    #[inline]
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }
}
