//! Error type for the rendering pipeline.

use std::fmt;

/// Errors raised while turning a decoded photo into a panel frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The decoded source image has a zero dimension.
    EmptySource { width: u32, height: u32 },
    /// Mounting rotation is not a multiple of 90 in `0..360`.
    InvalidRotation(u32),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::EmptySource { width, height } => {
                write!(f, "source image is empty ({}x{})", width, height)
            }
            PipelineError::InvalidRotation(deg) => {
                write!(f, "invalid rotation {}, expected 0, 90, 180 or 270", deg)
            }
        }
    }
}

impl std::error::Error for PipelineError {}
