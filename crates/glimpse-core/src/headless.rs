//! Off-screen windowing backend.
//!
//! Surfaces render into an in-memory framebuffer instead of a window. Used by
//! the `render` command and by tests to drive the full open/paint/close cycle
//! without a display.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::{imageops, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{GlimpseError, Result};
use crate::redraw::{Canvas, Redrawer, SizeProvider};
use crate::scale::{ScaledPlacement, ViewportSize};
use crate::surface::{Surface, SurfaceMode, Windowing};

/// RGBA framebuffer implementing [`Canvas`].
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    pub pixels: RgbaImage,
}

impl FrameBuffer {
    pub fn new(size: ViewportSize, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        Self {
            pixels: RgbaImage::from_pixel(size.width, size.height, Rgba([r, g, b, 255])),
        }
    }
}

impl Canvas for FrameBuffer {
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        imageops::overlay(&mut self.pixels, image, x as i64, y as i64);
    }
}

#[derive(Debug)]
struct SurfaceState {
    id: u64,
    mode: SurfaceMode,
    size: ViewportSize,
    redrawer: Option<Redrawer>,
    visible: bool,
    closed: bool,
    close_events: u32,
    paints: u32,
    framebuffer: Option<RgbaImage>,
    last_placement: Option<ScaledPlacement>,
}

/// Handle to an off-screen surface. Clones share the same surface.
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl HeadlessSurface {
    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> u64 {
        self.lock().id
    }

    pub fn mode(&self) -> SurfaceMode {
        self.lock().mode.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    /// Number of close events delivered (stays at 1 however often `close`
    /// is called).
    pub fn close_events(&self) -> u32 {
        self.lock().close_events
    }

    /// Number of completed paint passes, including degenerate ones.
    pub fn paint_count(&self) -> u32 {
        self.lock().paints
    }

    pub fn framebuffer(&self) -> Option<RgbaImage> {
        self.lock().framebuffer.clone()
    }

    pub fn last_placement(&self) -> Option<ScaledPlacement> {
        self.lock().last_placement
    }

    /// Simulate the window being resized; a visible surface repaints.
    pub fn resize(&self, size: ViewportSize) {
        let visible = {
            let mut state = self.lock();
            state.size = size;
            state.visible
        };
        if visible {
            self.paint();
        }
    }

    /// Run the paint callback into a fresh framebuffer of the current size.
    pub fn paint(&self) -> Option<ScaledPlacement> {
        let (redrawer, size, background) = {
            let state = self.lock();
            if state.closed {
                return None;
            }
            (state.redrawer.clone(), state.size, state.mode.background)
        };

        let mut canvas = FrameBuffer::new(size, background);
        // The lock is released here: the redrawer's size provider takes it.
        let placement = redrawer.and_then(|r| r.redraw(&mut canvas));

        let mut state = self.lock();
        state.paints += 1;
        state.framebuffer = Some(canvas.pixels);
        state.last_placement = placement;
        placement
    }
}

impl Surface for HeadlessSurface {
    fn set_paint_callback(&mut self, redrawer: Redrawer) {
        self.lock().redrawer = Some(redrawer);
    }

    fn size(&self) -> ViewportSize {
        self.lock().size
    }

    fn size_provider(&self) -> Arc<dyn SizeProvider> {
        let state = Arc::clone(&self.state);
        Arc::new(move || state.lock().unwrap_or_else(PoisonError::into_inner).size)
    }

    fn show(&mut self) -> Result<()> {
        {
            let mut state = self.lock();
            if state.closed {
                return Err(GlimpseError::Surface(format!(
                    "headless surface {} is closed",
                    state.id
                )));
            }
            state.visible = true;
        }
        self.paint();
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn close(&mut self) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        state.visible = false;
        state.close_events += 1;
        state.redrawer = None;
        state.framebuffer = None;
        debug!(id = state.id, "headless surface closed");
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    surfaces: Vec<HeadlessSurface>,
}

/// Creates [`HeadlessSurface`]s of a fixed "screen" size.
///
/// Maximized surfaces take the whole screen; others start at half of it.
/// Clones share the same registry.
#[derive(Clone)]
pub struct HeadlessWindowing {
    screen: ViewportSize,
    registry: Arc<Mutex<Registry>>,
}

impl HeadlessWindowing {
    pub fn new(screen: ViewportSize) -> Self {
        Self {
            screen,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every surface ever created, oldest first.
    pub fn surfaces(&self) -> Vec<HeadlessSurface> {
        self.lock().surfaces.clone()
    }

    /// Surfaces that have not been closed.
    pub fn live_surfaces(&self) -> Vec<HeadlessSurface> {
        self.surfaces()
            .into_iter()
            .filter(|s| !s.is_closed())
            .collect()
    }
}

impl Windowing for HeadlessWindowing {
    type Surface = HeadlessSurface;

    fn create_surface(&self, mode: SurfaceMode) -> Result<HeadlessSurface> {
        let size = if mode.maximized {
            self.screen
        } else {
            ViewportSize::new(self.screen.width / 2, self.screen.height / 2)
        };

        let mut registry = self.lock();
        registry.next_id += 1;
        let surface = HeadlessSurface {
            state: Arc::new(Mutex::new(SurfaceState {
                id: registry.next_id,
                mode,
                size,
                redrawer: None,
                visible: false,
                closed: false,
                close_events: 0,
                paints: 0,
                framebuffer: None,
                last_placement: None,
            })),
        };
        registry.surfaces.push(surface.clone());
        debug!(id = registry.next_id, ?size, "headless surface created");
        Ok(surface)
    }
}
