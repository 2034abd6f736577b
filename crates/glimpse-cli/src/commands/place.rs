use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use glimpse_core::config::GlimpseConfig;
use glimpse_core::io::image_io::load_image;
use glimpse_core::io::resolve::ResourceResolver;
use glimpse_core::scale::{compute_placement_with, fit_scale, FitPolicy};

use crate::summary::print_placement_summary;

#[derive(Args)]
pub struct PlaceArgs {
    /// Image path. Omit when giving --source directly.
    pub file: Option<PathBuf>,

    /// Source size as WIDTHxHEIGHT instead of decoding a file
    #[arg(long, conflicts_with = "file")]
    pub source: Option<String>,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080")]
    pub viewport: String,

    /// Never scale images up (overrides the configured fit policy)
    #[arg(long)]
    pub shrink_only: bool,
}

pub fn run(args: &PlaceArgs, config: &GlimpseConfig) -> Result<()> {
    let viewport = super::parse_viewport(&args.viewport)?;

    let (source_w, source_h) = match (&args.source, &args.file) {
        (Some(size), _) => {
            let size = super::parse_viewport(size)?;
            anyhow::ensure!(!size.is_empty(), "source size must be non-zero");
            (size.width, size.height)
        }
        (None, Some(file)) => {
            let resolver = ResourceResolver::from_config(&config.resources);
            let (image, _) = load_image(&resolver, file)?;
            image.dimensions()
        }
        (None, None) => anyhow::bail!("give an image path or --source WIDTHxHEIGHT"),
    };

    let fit = if args.shrink_only {
        FitPolicy::Shrink
    } else {
        config.render.fit
    };
    let scale = fit_scale(source_w, source_h, viewport.width, viewport.height, fit);
    let placement = compute_placement_with(source_w, source_h, viewport.width, viewport.height, fit);

    print_placement_summary((source_w, source_h), viewport, scale, fit, &placement);
    Ok(())
}
