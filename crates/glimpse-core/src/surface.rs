//! Seam between the session and a windowing backend.

use std::sync::Arc;

use crate::consts::DEFAULT_WINDOW_TITLE;
use crate::error::Result;
use crate::redraw::{Redrawer, SizeProvider};
use crate::scale::ViewportSize;

/// How a surface should be presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceMode {
    pub title: String,
    pub maximized: bool,
    pub undecorated: bool,
    pub background: [u8; 3],
}

impl Default for SurfaceMode {
    fn default() -> Self {
        Self {
            title: DEFAULT_WINDOW_TITLE.to_string(),
            maximized: true,
            undecorated: true,
            background: crate::consts::DEFAULT_BACKGROUND,
        }
    }
}

/// Creates top-level surfaces.
pub trait Windowing: Send + Sync {
    type Surface: Surface;

    fn create_surface(&self, mode: SurfaceMode) -> Result<Self::Surface>;
}

/// A single top-level window owned by a viewer session.
pub trait Surface: Send {
    /// Install the callback run whenever the surface needs repainting.
    fn set_paint_callback(&mut self, redrawer: Redrawer);

    /// Current drawable size.
    fn size(&self) -> ViewportSize;

    /// Shareable handle that always reports the current drawable size.
    fn size_provider(&self) -> Arc<dyn SizeProvider>;

    /// Make the surface visible. Fails with `Surface` once it is closed.
    fn show(&mut self) -> Result<()>;

    /// True once the surface was closed, by its session or by the window
    /// system.
    fn is_closed(&self) -> bool;

    /// Deliver the close event and release the surface. Must be safe to call
    /// more than once.
    fn close(&mut self);
}
