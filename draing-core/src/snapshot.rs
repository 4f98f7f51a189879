//! Encoded snapshots of the drawing surface.
//!
//! A snapshot is the PNG encoding of the surface, base64-encoded, with the
//! `data:image/png;base64,` prefix stripped. Browsers hand the surface out as
//! a data URI; the in-memory raster hands out raw PNG bytes. Both end up here.

use base64::Engine;

use crate::error::{CanvasError, CanvasResult};

/// MIME type of every snapshot.
pub const PNG_MIME: &str = "image/png";

/// A read-only, encoded copy of the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    base64: String,
}

impl Snapshot {
    /// Build a snapshot from raw PNG bytes.
    #[must_use]
    pub fn from_png(width: u32, height: u32, png: &[u8]) -> Self {
        Self {
            width,
            height,
            base64: base64::engine::general_purpose::STANDARD.encode(png),
        }
    }

    /// Build a snapshot from a `data:image/png;base64,...` URI.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidDataUri`] if the URI is not a base64 PNG
    /// data URI.
    pub fn from_data_uri(width: u32, height: u32, uri: &str) -> CanvasResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| CanvasError::InvalidDataUri("not a data URI".to_string()))?;

        let (metadata, payload) = rest
            .split_once(',')
            .ok_or_else(|| CanvasError::InvalidDataUri("missing comma".to_string()))?;

        if !metadata.ends_with(";base64") {
            return Err(CanvasError::InvalidDataUri(format!(
                "expected base64 payload, got '{metadata}'"
            )));
        }
        if !metadata.starts_with(PNG_MIME) {
            return Err(CanvasError::InvalidDataUri(format!(
                "expected {PNG_MIME}, got '{metadata}'"
            )));
        }

        Ok(Self {
            width,
            height,
            base64: payload.to_string(),
        })
    }

    /// Width of the captured surface.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the captured surface.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The base64 PNG payload, without any prefix.
    #[must_use]
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// The snapshot re-wrapped as a data URI for inline image transport.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{PNG_MIME};base64,{}", self.base64)
    }

    /// Decode the payload back into PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidDataUri`] if the payload is not valid base64.
    pub fn png_bytes(&self) -> CanvasResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.base64)
            .map_err(|e| CanvasError::InvalidDataUri(format!("bad base64 payload: {e}")))
    }
}
