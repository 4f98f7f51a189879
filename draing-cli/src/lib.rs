//! # drAing CLI
//!
//! Native host for drAing. Replays a stroke script onto an in-memory raster,
//! writes the result as PNG and, on request, asks the magic wand what it
//! sees.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p draing-cli -- --script strokes.json --output drawing.png
//! ```
//!
//! ## With the magic wand:
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run -p draing-cli -- --script strokes.json --analyze
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod script;

pub use script::{ScriptError, ScriptEvent, StrokeScript};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use draing_core::{DisplayRect, DrawingController};
use draing_magic::{
    MagicConfig, MagicResult, OpenAiDescriber, Studio, API_KEY_ENV, DEFAULT_MODEL,
};

/// Command-line arguments for draing.
#[derive(Debug, Clone, Parser)]
#[command(name = "draing")]
#[command(about = "Replay drawings and ask the magic wand about them")]
#[command(version)]
pub struct CliArgs {
    /// Stroke script (JSON) to replay
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Where to write the PNG
    #[arg(long, default_value = "drawing.png")]
    pub output: PathBuf,

    /// Raster width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Raster height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Width of the display box script coordinates refer to (defaults to --width)
    #[arg(long)]
    pub display_width: Option<f32>,

    /// Height of the display box script coordinates refer to (defaults to --height)
    #[arg(long)]
    pub display_height: Option<f32>,

    /// Ask the vision model to describe the drawing
    #[arg(long)]
    pub analyze: bool,

    /// Vision model used for the description
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key for the completion service
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Stroke script to replay.
    pub script: Option<PathBuf>,
    /// PNG output path.
    pub output: PathBuf,
    /// Raster width.
    pub width: u32,
    /// Raster height.
    pub height: u32,
    /// Display box the script coordinates refer to.
    pub display: DisplayRect,
    /// Whether to request a description.
    pub analyze: bool,
    /// Completion service settings.
    pub magic: MagicConfig,
}

impl From<CliArgs> for RunConfig {
    #[allow(clippy::cast_precision_loss)]
    fn from(args: CliArgs) -> Self {
        let display = DisplayRect::new(
            0.0,
            0.0,
            args.display_width.unwrap_or(args.width as f32),
            args.display_height.unwrap_or(args.height as f32),
        );

        Self {
            script: args.script,
            output: args.output,
            width: args.width,
            height: args.height,
            display,
            analyze: args.analyze,
            magic: MagicConfig::new(args.api_key.unwrap_or_default()).with_model(args.model),
        }
    }
}

/// Build a studio on an in-memory raster of the configured size.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn build_studio(config: &RunConfig) -> MagicResult<Studio> {
    let canvas = DrawingController::with_raster(config.width, config.height);
    let describer = OpenAiDescriber::new(config.magic.clone())?;
    Ok(Studio::new(canvas, Arc::new(describer)))
}

/// Write the studio's raster to `path` as PNG.
///
/// Returns `false` when there is no raster to write.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_png(studio: &Studio, path: &Path) -> anyhow::Result<bool> {
    let Some(surface) = studio.canvas().surface() else {
        return Ok(false);
    };
    let png = surface.to_png()?;
    std::fs::write(path, png)?;
    Ok(true)
}
