//! Error types for rasterization and video output.

use dronemaze_core::VizError;
use thiserror::Error;

/// Errors that can occur while drawing or encoding frames.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Loading or composing failed before any pixels were drawn
    #[error(transparent)]
    Core(#[from] VizError),
    
    /// Drawing backend rejected a primitive or label
    #[error("Drawing error: {0}")]
    Draw(String),
    
    /// Frame buffer does not match the configured resolution
    #[error("Frame is {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
    
    /// The external encoder could not be started
    #[error("Video encoder `{program}` is unavailable: {source}")]
    EncoderUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },
    
    /// The external encoder exited abnormally
    #[error("Video encoder failed: {0}")]
    EncoderFailed(String),
    
    /// Sink used after `finish`
    #[error("Sink already finished")]
    SinkClosed,
    
    /// Output file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    /// GIF encoding failed
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

impl RenderError {
    /// Creates a drawing error from any backend error.
    pub fn draw(err: impl std::fmt::Display) -> Self {
        Self::Draw(err.to_string())
    }
}

/// Result alias used throughout the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
