use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::source::SourceImage;

/// Resampling strategy used on every repaint.
///
/// The image is resampled from the full-resolution source each time the
/// surface paints, so the default favours speed over quality to keep
/// interactive resizing responsive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResamplePolicy {
    /// Nearest neighbour.
    #[default]
    Speed,
    /// Bilinear.
    Balanced,
    /// Lanczos with window 3.
    Quality,
}

impl ResamplePolicy {
    pub fn filter(self) -> FilterType {
        match self {
            ResamplePolicy::Speed => FilterType::Nearest,
            ResamplePolicy::Balanced => FilterType::Triangle,
            ResamplePolicy::Quality => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for ResamplePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResamplePolicy::Speed => write!(f, "speed (nearest)"),
            ResamplePolicy::Balanced => write!(f, "balanced (bilinear)"),
            ResamplePolicy::Quality => write!(f, "quality (lanczos3)"),
        }
    }
}

/// Resample `source` to exactly `width` x `height`.
///
/// Callers skip degenerate sizes; both dimensions must be non-zero.
pub fn resample(source: &SourceImage, width: u32, height: u32, policy: ResamplePolicy) -> RgbaImage {
    debug_assert!(width > 0 && height > 0, "degenerate resample {width}x{height}");
    if (width, height) == source.dimensions() {
        return source.pixels.clone();
    }
    imageops::resize(&source.pixels, width, height, policy.filter())
}
