//! eframe/egui implementation of the windowing seam.
//!
//! Every surface is an egui deferred viewport: a real OS window that lives as
//! long as the root app keeps calling `show_viewport_deferred` for it. Closing
//! a surface marks it closed; the root drops it on its next frame and eframe
//! destroys the window.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glimpse_core::error::{GlimpseError, Result};
use glimpse_core::redraw::{Redrawer, SizeProvider};
use glimpse_core::scale::ViewportSize;
use glimpse_core::surface::{Surface, SurfaceMode, Windowing};
use tracing::{debug, info};

/// State shared between a surface handle (session side) and its viewport
/// callback (UI thread).
pub struct SurfaceShared {
    pub id: egui::ViewportId,
    pub mode: SurfaceMode,
    pub redrawer: Option<Redrawer>,
    /// Last drawable size seen by the viewport, in physical pixels.
    pub size: ViewportSize,
    pub visible: bool,
    pub closed: bool,
    /// Texture holding the last drawn frame, reused across repaints.
    pub texture: Option<egui::TextureHandle>,
}

impl SurfaceShared {
    pub fn mark_closed(&mut self) {
        self.closed = true;
        self.visible = false;
        self.redrawer = None;
        self.texture = None;
    }
}

pub type SharedSurface = Arc<Mutex<SurfaceShared>>;

pub fn lock_surface(surface: &SharedSurface) -> MutexGuard<'_, SurfaceShared> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Surfaces the root app must keep showing.
#[derive(Clone, Default)]
pub struct SurfaceRegistry {
    surfaces: Arc<Mutex<Vec<SharedSurface>>>,
}

impl SurfaceRegistry {
    fn lock(&self) -> MutexGuard<'_, Vec<SharedSurface>> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, surface: SharedSurface) {
        self.lock().push(surface);
    }

    /// Forget closed surfaces and return the visible ones.
    pub fn visible_surfaces(&self) -> Vec<SharedSurface> {
        let mut surfaces = self.lock();
        surfaces.retain(|s| !lock_surface(s).closed);
        surfaces
            .iter()
            .filter(|s| lock_surface(s).visible)
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct EguiWindowing {
    ctx: egui::Context,
    registry: SurfaceRegistry,
    next_id: Arc<AtomicU64>,
}

impl EguiWindowing {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            registry: SurfaceRegistry::default(),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }
}

impl Windowing for EguiWindowing {
    type Surface = EguiSurface;

    fn create_surface(&self, mode: SurfaceMode) -> Result<EguiSurface> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = egui::ViewportId::from_hash_of(("glimpse-surface", n));
        let shared = Arc::new(Mutex::new(SurfaceShared {
            id,
            mode,
            redrawer: None,
            size: ViewportSize::ZERO,
            visible: false,
            closed: false,
            texture: None,
        }));
        self.registry.register(Arc::clone(&shared));
        debug!(surface = n, "egui surface created");

        Ok(EguiSurface {
            ctx: self.ctx.clone(),
            shared,
        })
    }
}

pub struct EguiSurface {
    ctx: egui::Context,
    shared: SharedSurface,
}

impl Surface for EguiSurface {
    fn set_paint_callback(&mut self, redrawer: Redrawer) {
        lock_surface(&self.shared).redrawer = Some(redrawer);
    }

    fn size(&self) -> ViewportSize {
        lock_surface(&self.shared).size
    }

    fn size_provider(&self) -> Arc<dyn SizeProvider> {
        let shared = Arc::clone(&self.shared);
        Arc::new(move || lock_surface(&shared).size)
    }

    fn show(&mut self) -> Result<()> {
        {
            let mut shared = lock_surface(&self.shared);
            if shared.closed {
                return Err(GlimpseError::Surface(format!(
                    "viewport {:?} is closed",
                    shared.id
                )));
            }
            shared.visible = true;
        }
        self.ctx.request_repaint();
        Ok(())
    }

    fn is_closed(&self) -> bool {
        lock_surface(&self.shared).closed
    }

    fn close(&mut self) {
        {
            let mut shared = lock_surface(&self.shared);
            if shared.closed {
                return;
            }
            shared.mark_closed();
        }
        info!("viewer window closing");
        self.ctx.request_repaint();
    }
}
