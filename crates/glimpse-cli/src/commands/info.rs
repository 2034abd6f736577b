use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use glimpse_core::config::GlimpseConfig;
use glimpse_core::io::image_io::load_image;
use glimpse_core::io::resolve::ResourceResolver;
use glimpse_core::source::Origin;

#[derive(Args)]
pub struct InfoArgs {
    /// Image path (filesystem first, then bundled resources)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs, config: &GlimpseConfig) -> Result<()> {
    let resolver = ResourceResolver::from_config(&config.resources);
    let (image, info) = load_image(&resolver, &args.file)?;

    println!("File:        {}", info.requested.display());
    match &info.origin {
        Origin::File(path) => println!("Source:      file {}", path.display()),
        Origin::Resource { root, path } => println!(
            "Source:      resource {} (root {})",
            path.display(),
            root.display()
        ),
    }
    println!("Dimensions:  {}x{}", info.width, info.height);
    match info.format {
        Some(format) => println!("Format:      {:?}", format),
        None => println!("Format:      unknown"),
    }
    println!("File size:   {:.1} KB", info.byte_len as f64 / 1024.0);

    let decoded_mb = image.data_size_bytes() as f64 / (1024.0 * 1024.0);
    println!("Decoded:     {:.1} MB (RGBA8)", decoded_mb);

    Ok(())
}
