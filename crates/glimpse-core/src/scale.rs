//! Fit-and-center placement math.
//!
//! Pure arithmetic: given a source raster size and a viewport size, work out
//! how large the image is drawn and where its top-left corner goes so that it
//! sits centered in the viewport without distortion.

use serde::{Deserialize, Serialize};

/// Drawable area of a surface, in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const ZERO: ViewportSize = ViewportSize {
        width: 0,
        height: 0,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where and how large to draw the image for one frame.
///
/// Offsets are signed: a placement larger than the viewport is still
/// centered and simply clipped by the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScaledPlacement {
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl ScaledPlacement {
    /// True when nothing would be drawn.
    pub fn is_degenerate(&self) -> bool {
        self.scaled_width == 0 || self.scaled_height == 0
    }
}

/// How to treat an image that already fits inside the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitPolicy {
    /// Scale up or down so the image touches the viewport on one axis.
    #[default]
    Fill,
    /// Only scale down; images that fit are drawn at native size.
    Shrink,
}

/// Uniform scale factor that fits `source` into `viewport`.
pub fn fit_scale(
    source_w: u32,
    source_h: u32,
    viewport_w: u32,
    viewport_h: u32,
    policy: FitPolicy,
) -> f64 {
    debug_assert!(source_w > 0 && source_h > 0, "source must be non-empty");
    let scale_x = viewport_w as f64 / source_w as f64;
    let scale_y = viewport_h as f64 / source_h as f64;
    let scale = scale_x.min(scale_y);
    match policy {
        FitPolicy::Fill => scale,
        FitPolicy::Shrink => scale.min(1.0),
    }
}

/// Placement for `source` inside `viewport` using [`FitPolicy::Fill`].
pub fn compute_placement(
    source_w: u32,
    source_h: u32,
    viewport_w: u32,
    viewport_h: u32,
) -> ScaledPlacement {
    compute_placement_with(source_w, source_h, viewport_w, viewport_h, FitPolicy::Fill)
}

/// Placement for `source` inside `viewport` under the given fit policy.
///
/// A zero-area viewport gives a degenerate placement with zero scaled size.
pub fn compute_placement_with(
    source_w: u32,
    source_h: u32,
    viewport_w: u32,
    viewport_h: u32,
    policy: FitPolicy,
) -> ScaledPlacement {
    let scale = fit_scale(source_w, source_h, viewport_w, viewport_h, policy);

    // Rounding may overshoot by a pixel on the limiting axis.
    let scaled_width = ((source_w as f64 * scale).round() as u32).min(viewport_w);
    let scaled_height = ((source_h as f64 * scale).round() as u32).min(viewport_h);

    ScaledPlacement {
        scaled_width,
        scaled_height,
        offset_x: center_offset(viewport_w, scaled_width),
        offset_y: center_offset(viewport_h, scaled_height),
    }
}

/// Viewport half minus drawn half, both truncated.
pub fn center_offset(viewport: u32, scaled: u32) -> i32 {
    (viewport / 2) as i32 - (scaled / 2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_offset_truncates_each_half() {
        assert_eq!(center_offset(800, 711), 45);
        assert_eq!(center_offset(7, 3), 2);
        assert_eq!(center_offset(3, 7), -2);
    }

    #[test]
    fn test_shrink_keeps_native_size() {
        let p = compute_placement_with(100, 50, 800, 600, FitPolicy::Shrink);
        assert_eq!((p.scaled_width, p.scaled_height), (100, 50));
        assert_eq!((p.offset_x, p.offset_y), (350, 275));
    }
}
