//! Stroke scripts: recorded input replayed onto a studio.
//!
//! A script is a JSON array of tagged events:
//!
//! ```json
//! [
//!   {"type": "color", "color": "#1e90ff"},
//!   {"type": "width", "width": 8},
//!   {"type": "down", "x": 10, "y": 10},
//!   {"type": "move", "x": 50, "y": 50},
//!   {"type": "up"}
//! ]
//! ```
//!
//! Coordinates are in display space and go through the same input mapping
//! as live pointer events.

use std::path::Path;

use draing_core::{BrushWidth, Color, DisplayRect, PointerInput, Surface, Tool};
use draing_magic::Studio;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a stroke script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The script is not valid JSON for the event format.
    #[error("invalid stroke script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    /// Select a tool.
    Tool {
        /// Tool to select.
        tool: Tool,
    },
    /// Choose the brush color.
    Color {
        /// New color.
        color: Color,
    },
    /// Set the brush width (clamped to the slider range).
    Width {
        /// New width.
        width: u32,
    },
    /// Pointer pressed.
    Down {
        /// Display X.
        x: f32,
        /// Display Y.
        y: f32,
    },
    /// Pointer dragged.
    Move {
        /// Display X.
        x: f32,
        /// Display Y.
        y: f32,
    },
    /// Pointer released or left the canvas.
    Up,
    /// Clear the canvas.
    Clear,
}

/// A parsed stroke script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeScript {
    events: Vec<ScriptEvent>,
}

impl StrokeScript {
    /// Wrap a list of events.
    #[must_use]
    pub fn new(events: Vec<ScriptEvent>) -> Self {
        Self { events }
    }

    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] if the JSON is malformed.
    pub fn parse(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&json)
    }

    /// The events in order.
    #[must_use]
    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    /// Apply every event to `studio`, mapping positions through `displayed`.
    pub fn replay<S: Surface>(&self, studio: &mut Studio<S>, displayed: &DisplayRect) {
        for event in &self.events {
            match event {
                ScriptEvent::Tool { tool } => studio.canvas_mut().set_tool(*tool),
                ScriptEvent::Color { color } => studio.canvas_mut().set_color(*color),
                ScriptEvent::Width { width } => {
                    studio.canvas_mut().set_width(BrushWidth::clamp_ui(*width));
                }
                ScriptEvent::Down { x, y } => {
                    let point = studio
                        .canvas()
                        .map_input_to_point(&PointerInput::mouse(*x, *y), displayed);
                    studio.canvas_mut().begin_stroke(point);
                }
                ScriptEvent::Move { x, y } => {
                    let point = studio
                        .canvas()
                        .map_input_to_point(&PointerInput::mouse(*x, *y), displayed);
                    studio.canvas_mut().continue_stroke(point);
                }
                ScriptEvent::Up => studio.canvas_mut().end_stroke(),
                ScriptEvent::Clear => studio.clear(),
            }
        }
        tracing::debug!("Replayed {} events", self.events.len());
    }
}
