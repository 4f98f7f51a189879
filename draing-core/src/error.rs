//! Error types for drawing operations.

use thiserror::Error;

/// Result type for drawing operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in drawing operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A color string was not in `#rrggbb` form.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The surface cannot be created with a zero dimension.
    #[error("Surface has zero usable area: {width}x{height}")]
    ZeroSizeSurface {
        /// Requested width in device pixels.
        width: u32,
        /// Requested height in device pixels.
        height: u32,
    },

    /// Encoding the surface to an image failed.
    #[error("Image encoding failed: {0}")]
    Encoding(String),

    /// A data URI could not be split into metadata and payload.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),
}
