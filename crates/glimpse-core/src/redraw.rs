//! The paint callback handed to a surface.

use std::sync::Arc;

use image::RgbaImage;
use tracing::trace;

use crate::resample::{resample, ResamplePolicy};
use crate::scale::{compute_placement_with, FitPolicy, ScaledPlacement, ViewportSize};
use crate::source::SourceImage;

/// Reports the current drawable size of a surface.
///
/// Queried on every redraw; implementations must not cache on behalf of the
/// caller.
pub trait SizeProvider: Send + Sync {
    fn viewport_size(&self) -> ViewportSize;
}

impl<F> SizeProvider for F
where
    F: Fn() -> ViewportSize + Send + Sync,
{
    fn viewport_size(&self) -> ViewportSize {
        self()
    }
}

impl SizeProvider for ViewportSize {
    fn viewport_size(&self) -> ViewportSize {
        *self
    }
}

/// Drawing target for one frame.
pub trait Canvas {
    /// Draw `image` with its top-left corner at `(x, y)`. Parts outside the
    /// canvas are clipped.
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32);
}

/// Render settings a redrawer applies on every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedrawPolicy {
    pub resample: ResamplePolicy,
    pub fit: FitPolicy,
}

/// Scales the session's source image into whatever size the surface reports.
#[derive(Clone)]
pub struct Redrawer {
    source: Arc<SourceImage>,
    size_provider: Arc<dyn SizeProvider>,
    policy: RedrawPolicy,
}

impl Redrawer {
    pub fn new(
        source: Arc<SourceImage>,
        size_provider: Arc<dyn SizeProvider>,
        policy: RedrawPolicy,
    ) -> Self {
        Self {
            source,
            size_provider,
            policy,
        }
    }

    pub fn source(&self) -> &Arc<SourceImage> {
        &self.source
    }

    pub fn policy(&self) -> RedrawPolicy {
        self.policy
    }

    /// Placement for the size the surface reports right now.
    pub fn placement(&self) -> ScaledPlacement {
        let viewport = self.size_provider.viewport_size();
        compute_placement_with(
            self.source.width(),
            self.source.height(),
            viewport.width,
            viewport.height,
            self.policy.fit,
        )
    }

    /// Paint one frame. Returns the placement that was drawn, or `None` when
    /// the placement was degenerate and nothing was drawn.
    pub fn redraw(&self, canvas: &mut dyn Canvas) -> Option<ScaledPlacement> {
        let placement = self.placement();
        if placement.is_degenerate() {
            trace!("skipping degenerate placement");
            return None;
        }

        let scaled = resample(
            &self.source,
            placement.scaled_width,
            placement.scaled_height,
            self.policy.resample,
        );
        canvas.draw_image(&scaled, placement.offset_x, placement.offset_y);
        Some(placement)
    }
}

impl std::fmt::Debug for Redrawer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redrawer")
            .field("source", &self.source.dimensions())
            .field("policy", &self.policy)
            .finish()
    }
}
