//! # drAing Core
//!
//! Drawing logic for the drAing canvas: a raster surface the user paints on
//! with a brush or an eraser, and the mapping from pointer/touch input into
//! surface coordinates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             DrawingController               │
//! ├──────────────────────┬──────────────────────┤
//! │  Tool state          │  Input mapping       │
//! │  - Brush / eraser    │  - Mouse events      │
//! │  - Color, width      │  - First touch       │
//! ├──────────────────────┴──────────────────────┤
//! │  Surface trait                              │
//! │  - RasterSurface (tiny-skia, in memory)     │
//! │  - Host surfaces (browser 2D context)       │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod controller;
pub mod error;
pub mod event;
pub mod snapshot;
pub mod surface;

pub use color::{BrushWidth, Color, Tool};
pub use controller::DrawingController;
pub use error::{CanvasError, CanvasResult};
pub use event::{map_to_buffer, DisplayRect, Point, PointerInput, TouchPoint};
pub use snapshot::{Snapshot, PNG_MIME};
pub use surface::{RasterSurface, StrokeStyle, Surface};
