pub mod config;
pub mod info;
pub mod place;
pub mod render;

use std::path::Path;

use anyhow::{bail, Context, Result};
use glimpse_core::config::GlimpseConfig;
use glimpse_core::scale::ViewportSize;

/// Load the config file if one was given, otherwise defaults.
pub fn load_config(path: Option<&Path>) -> Result<GlimpseConfig> {
    match path {
        Some(path) => GlimpseConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(GlimpseConfig::default()),
    }
}

/// Parse a `WIDTHxHEIGHT` viewport such as `1920x1080`.
pub fn parse_viewport(s: &str) -> Result<ViewportSize> {
    let Some((w, h)) = s.split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT, got '{s}'");
    };
    let width = w
        .trim()
        .parse()
        .with_context(|| format!("invalid viewport width '{w}'"))?;
    let height = h
        .trim()
        .parse()
        .with_context(|| format!("invalid viewport height '{h}'"))?;
    Ok(ViewportSize::new(width, height))
}
