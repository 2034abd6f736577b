mod app;
mod backend;
mod convert;
mod messages;
mod panels;
mod states;
mod steps;
mod worker;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glimpse_core::config::GlimpseConfig;

use crate::steps::StepSource;

#[derive(Parser)]
#[command(name = "glimpse-gui", about = "Fit-to-window image viewer driven by steps")]
#[command(version)]
struct Args {
    /// TOML config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read steps from this file instead of stdin
    #[arg(short, long)]
    steps: Option<PathBuf>,

    /// Keep the control window open after teardown
    #[arg(long)]
    keep_open: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GlimpseConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GlimpseConfig::default(),
    };
    let steps = match args.steps {
        Some(path) => StepSource::File(path),
        None => StepSource::Stdin,
    };
    let keep_open = args.keep_open;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 240.0])
            .with_title("Glimpse"),
        ..Default::default()
    };

    eframe::run_native(
        "Glimpse",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::GlimpseApp::new(
                &cc.egui_ctx,
                &config,
                steps,
                keep_open,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
