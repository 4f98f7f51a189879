//! # drAing CLI
//!
//! Replays a stroke script and optionally asks the magic wand about it.

use clap::Parser;
use draing_cli::{build_studio, write_png, CliArgs, RunConfig, StrokeScript};
use draing_magic::AnalysisStatus;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "draing_cli=info,draing_core=info,draing_magic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = RunConfig::from(args);

    tracing::info!("Canvas {}x{}", config.width, config.height);

    let mut studio = build_studio(&config)?;

    if let Some(ref path) = config.script {
        let script = StrokeScript::load(path)?;
        tracing::info!(
            "Replaying {} events from {}",
            script.events().len(),
            path.display()
        );
        script.replay(&mut studio, &config.display);
    }

    if write_png(&studio, &config.output)? {
        tracing::info!("Wrote {}", config.output.display());
    } else {
        tracing::warn!("Nothing to write: the canvas has no usable area");
    }

    if config.analyze {
        let rt = tokio::runtime::Runtime::new()?;
        match rt.block_on(studio.analyze()) {
            Some(AnalysisStatus::Succeeded(text) | AnalysisStatus::Failed(text)) => {
                println!("{text}");
            }
            Some(AnalysisStatus::Idle | AnalysisStatus::Pending) | None => {
                tracing::warn!("No description available");
            }
        }
    }

    Ok(())
}
