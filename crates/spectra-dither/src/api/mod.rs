//! High-level API: the [`FrameRenderer`] builder and [`PipelineError`].

mod builder;
mod error;

pub use builder::{FrameRenderer, RenderedFrame};
pub use error::PipelineError;
