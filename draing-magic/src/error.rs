//! Error types for the magic wand.

use draing_core::CanvasError;
use thiserror::Error;

/// Result type for magic wand operations.
pub type MagicResult<T> = Result<T, MagicError>;

/// Errors that can occur while asking the vision service about a drawing.
///
/// None of these reach the user: every failure collapses into the fallback
/// message once the analysis settles.
#[derive(Debug, Error)]
pub enum MagicError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid completion endpoint: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, TLS, body decoding).
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failed.
    #[error("failed to handle completion payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("completion service returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the service.
        message: String,
    },

    /// The response carried no usable text.
    #[error("completion response had no text content")]
    EmptyResponse,

    /// The drawing could not be encoded.
    #[error("drawing snapshot failed: {0}")]
    Snapshot(#[from] CanvasError),
}
