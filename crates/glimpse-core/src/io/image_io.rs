use std::path::Path;

use image::error::{LimitError, LimitErrorKind};
use image::{ImageError, ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::{GlimpseError, Result};
use crate::io::resolve::{ByteSource, ResourceResolver};
use crate::source::{ImageInfo, SourceImage};

/// Decode a byte source into an RGBA8 raster.
///
/// Fails with [`GlimpseError::Decode`] on malformed or unsupported data, and
/// on images with a zero dimension (nothing to scale).
pub fn decode(source: &ByteSource) -> Result<SourceImage> {
    let decode_err = |err: ImageError| GlimpseError::Decode {
        path: source.requested.clone(),
        source: err,
    };

    let img = image::load_from_memory(&source.bytes).map_err(decode_err)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(decode_err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::DimensionError,
        ))));
    }

    debug!(
        path = %source.requested.display(),
        width = img.width(),
        height = img.height(),
        "decoded image"
    );

    Ok(SourceImage::new(img.to_rgba8()).with_origin(source.origin.clone()))
}

/// Resolve `path` and decode it, returning the raster and its metadata.
pub fn load_image(resolver: &ResourceResolver, path: &Path) -> Result<(SourceImage, ImageInfo)> {
    let source = resolver.resolve(path)?;
    let image = decode(&source)?;
    let info = ImageInfo {
        requested: source.requested.clone(),
        origin: source.origin.clone(),
        width: image.width(),
        height: image.height(),
        format: image::guess_format(&source.bytes).ok(),
        byte_len: source.bytes.len(),
    };
    Ok((image, info))
}

/// Save an RGBA raster as 8-bit PNG.
pub fn save_png(pixels: &RgbaImage, path: &Path) -> Result<()> {
    pixels.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
