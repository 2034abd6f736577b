//! The single active viewing session.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::config::GlimpseConfig;
use crate::error::Result;
use crate::io::image_io::load_image;
use crate::io::resolve::ResourceResolver;
use crate::redraw::{RedrawPolicy, Redrawer};
use crate::scale::ViewportSize;
use crate::source::{ImageInfo, SourceImage};
use crate::surface::{Surface, SurfaceMode, Windowing};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
}

struct ActiveSession<S> {
    surface: S,
    source: Arc<SourceImage>,
    info: Option<ImageInfo>,
}

/// Owns at most one open viewer surface.
///
/// `open_*` and `close` may be called from any thread; the slot is guarded
/// by a mutex. Paint callbacks hold their own `Arc` of the source image and
/// never take this lock, so a windowing event thread cannot deadlock against
/// an open or close in progress.
pub struct ViewerSession<W: Windowing> {
    windowing: W,
    resolver: ResourceResolver,
    mode: SurfaceMode,
    policy: RedrawPolicy,
    active: Mutex<Option<ActiveSession<W::Surface>>>,
}

impl<W: Windowing> ViewerSession<W> {
    pub fn new(windowing: W, resolver: ResourceResolver) -> Self {
        Self {
            windowing,
            resolver,
            mode: SurfaceMode::default(),
            policy: RedrawPolicy::default(),
            active: Mutex::new(None),
        }
    }

    pub fn from_config(windowing: W, config: &GlimpseConfig) -> Self {
        Self::new(windowing, ResourceResolver::from_config(&config.resources))
            .with_mode(config.surface_mode())
            .with_policy(config.render.redraw_policy())
    }

    pub fn with_mode(mut self, mode: SurfaceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: RedrawPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve, decode and show the image at `path`, replacing any session
    /// that is already open.
    ///
    /// The previous session is closed before the new image is read, so a
    /// failed open leaves the viewer closed. The slot is not locked while
    /// the file is read and decoded.
    pub fn open_image(&self, path: &Path) -> Result<ImageInfo> {
        self.close();
        let (image, info) = load_image(&self.resolver, path)?;

        let mut slot = self.lock();
        close_slot(&mut slot);
        self.open_locked(&mut slot, image, Some(info.clone()))?;
        info!(
            path = %path.display(),
            width = info.width,
            height = info.height,
            "opened image"
        );
        Ok(info)
    }

    /// Show an already decoded image, replacing any open session.
    pub fn open(&self, image: SourceImage) -> Result<()> {
        let mut slot = self.lock();
        close_slot(&mut slot);
        self.open_locked(&mut slot, image, None)
    }

    fn open_locked(
        &self,
        slot: &mut Option<ActiveSession<W::Surface>>,
        image: SourceImage,
        info: Option<ImageInfo>,
    ) -> Result<()> {
        let source = Arc::new(image);
        let mut surface = self.windowing.create_surface(self.mode.clone())?;
        surface.set_paint_callback(Redrawer::new(
            Arc::clone(&source),
            surface.size_provider(),
            self.policy,
        ));
        if let Err(e) = surface.show() {
            surface.close();
            return Err(e);
        }

        debug!(
            width = source.width(),
            height = source.height(),
            "surface shown"
        );
        *slot = Some(ActiveSession {
            surface,
            source,
            info,
        });
        Ok(())
    }

    /// Close the open session, if any.
    pub fn close(&self) {
        close_slot(&mut self.lock());
    }

    /// End-of-run hook: guarantees no session survives.
    pub fn teardown(&self) {
        debug!("session teardown");
        self.close();
    }

    pub fn state(&self) -> SessionState {
        if self.lock().is_some() {
            SessionState::Open
        } else {
            SessionState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }

    /// Native size of the image being shown.
    pub fn source_dimensions(&self) -> Option<(u32, u32)> {
        self.lock().as_ref().map(|a| a.source.dimensions())
    }

    pub fn current_info(&self) -> Option<ImageInfo> {
        self.lock().as_ref().and_then(|a| a.info.clone())
    }

    /// Current drawable size of the open surface.
    pub fn viewport_size(&self) -> Option<ViewportSize> {
        self.lock().as_ref().map(|a| a.surface.size())
    }

    /// Run `f` against the open surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&W::Surface) -> R) -> Option<R> {
        self.lock().as_ref().map(|a| f(&a.surface))
    }

    /// Lock the slot, forgetting a session whose surface the window system
    /// already closed.
    fn lock(&self) -> MutexGuard<'_, Option<ActiveSession<W::Surface>>> {
        let mut slot = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|a| a.surface.is_closed()) {
            slot.take();
            info!("viewer window was closed outside the session");
        }
        slot
    }
}

impl<W: Windowing> Drop for ViewerSession<W> {
    fn drop(&mut self) {
        self.close();
    }
}

fn close_slot<S: Surface>(slot: &mut Option<ActiveSession<S>>) {
    if let Some(mut active) = slot.take() {
        active.surface.close();
        info!(
            width = active.source.width(),
            height = active.source.height(),
            "closed viewer"
        );
    }
}
