use std::path::PathBuf;

use image::RgbaImage;

use crate::consts::SOURCE_CHANNELS;

/// A decoded source raster. Pixels are RGBA8, row-major.
///
/// Immutable once decoded; the session and its paint callback share it
/// read-only through an `Arc`.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub pixels: RgbaImage,
    /// Where the bytes came from, when known.
    pub origin: Option<Origin>,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Size of the decoded pixel buffer in bytes.
    pub fn data_size_bytes(&self) -> usize {
        self.width() as usize * self.height() as usize * SOURCE_CHANNELS
    }
}

/// Where a byte source was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The literal path existed on the filesystem.
    File(PathBuf),
    /// Found under a bundled-resource root.
    Resource { root: PathBuf, path: PathBuf },
}

impl Origin {
    /// The concrete file the bytes were read from.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Origin::File(path) => path,
            Origin::Resource { path, .. } => path,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, Origin::Resource { .. })
    }
}

/// Metadata about an opened image, reported back to whoever issued the open.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageInfo {
    pub requested: PathBuf,
    pub origin: Origin,
    pub width: u32,
    pub height: u32,
    pub format: Option<image::ImageFormat>,
    pub byte_len: usize,
}
