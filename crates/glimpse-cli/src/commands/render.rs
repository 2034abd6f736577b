use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use glimpse_core::config::GlimpseConfig;
use glimpse_core::headless::HeadlessWindowing;
use glimpse_core::io::image_io::save_png;
use glimpse_core::resample::ResamplePolicy;
use glimpse_core::session::ViewerSession;
use tracing::info;

use crate::summary::print_render_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum ResampleArg {
    Speed,
    Balanced,
    Quality,
}

impl From<ResampleArg> for ResamplePolicy {
    fn from(arg: ResampleArg) -> Self {
        match arg {
            ResampleArg::Speed => ResamplePolicy::Speed,
            ResampleArg::Balanced => ResamplePolicy::Balanced,
            ResampleArg::Quality => ResamplePolicy::Quality,
        }
    }
}

#[derive(Args)]
pub struct RenderArgs {
    /// Image path (filesystem first, then bundled resources)
    pub file: PathBuf,

    /// Off-screen viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080")]
    pub viewport: String,

    /// Resampling filter (overrides the config)
    #[arg(long, value_enum)]
    pub resample: Option<ResampleArg>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,
}

/// Run a complete open, paint, close cycle against the headless backend and
/// save what the surface showed.
pub fn run(args: &RenderArgs, config: &GlimpseConfig) -> Result<()> {
    let viewport = super::parse_viewport(&args.viewport)?;

    let mut config = config.clone();
    // The off-screen "screen" is the requested viewport.
    config.window.maximized = true;
    if let Some(resample) = args.resample {
        config.render.resample = resample.into();
    }

    let windowing = HeadlessWindowing::new(viewport);
    let session = ViewerSession::from_config(windowing, &config);

    let start = Instant::now();
    let image_info = session.open_image(&args.file)?;
    let (placement, frame) = session
        .with_surface(|surface| (surface.last_placement(), surface.framebuffer()))
        .context("viewer closed before rendering")?;
    let elapsed = start.elapsed();
    session.close();

    let frame = frame.context("surface was never painted")?;
    save_png(&frame, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), "render saved");

    print_render_summary(
        &image_info,
        viewport,
        config.render.resample,
        placement.as_ref(),
        &args.output,
        elapsed,
    );
    Ok(())
}
