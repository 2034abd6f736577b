use std::sync::Arc;

use glimpse_core::redraw::Canvas;
use glimpse_core::scale::ViewportSize;
use glimpse_core::surface::SurfaceMode;
use image::RgbaImage;
use tracing::warn;

use crate::backend::{lock_surface, SharedSurface, SurfaceRegistry};
use crate::convert::rgba_to_color_image;

/// Keep every visible viewer surface alive for this frame.
pub fn show_surfaces(ctx: &egui::Context, registry: &SurfaceRegistry) {
    for surface in registry.visible_surfaces() {
        let (id, builder) = {
            let shared = lock_surface(&surface);
            (shared.id, viewport_builder(&shared.mode))
        };
        let surface = Arc::clone(&surface);
        ctx.show_viewport_deferred(id, builder, move |ctx, _class| {
            paint_surface(ctx, &surface);
        });
    }
}

fn viewport_builder(mode: &SurfaceMode) -> egui::ViewportBuilder {
    egui::ViewportBuilder::default()
        .with_title(mode.title.clone())
        .with_decorations(!mode.undecorated)
        .with_maximized(mode.maximized)
}

/// Paint callback of one surface. Runs on the UI thread for every repaint of
/// that window, including each resize.
fn paint_surface(ctx: &egui::Context, surface: &SharedSurface) {
    if ctx.input(|i| i.viewport().close_requested()) {
        warn!("viewer window closed by the window system");
        lock_surface(surface).mark_closed();
        ctx.request_repaint_of(egui::ViewportId::ROOT);
        return;
    }

    let [r, g, b] = lock_surface(surface).mode.background;
    let background = egui::Color32::from_rgb(r, g, b);

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(background))
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            let pixels_per_point = ctx.pixels_per_point();

            // Publish the current size before the redrawer asks for it.
            let (redrawer, texture) = {
                let mut shared = lock_surface(surface);
                shared.size = physical_size(rect, pixels_per_point);
                (shared.redrawer.clone(), shared.texture.take())
            };
            let Some(redrawer) = redrawer else {
                return;
            };

            let mut canvas = EguiCanvas {
                ctx,
                painter: ui.painter(),
                origin: rect.min,
                pixels_per_point,
                texture,
            };
            redrawer.redraw(&mut canvas);

            let mut shared = lock_surface(surface);
            if !shared.closed {
                shared.texture = canvas.texture;
            }
        });
}

fn physical_size(rect: egui::Rect, pixels_per_point: f32) -> ViewportSize {
    ViewportSize::new(
        (rect.width() * pixels_per_point).round().max(0.0) as u32,
        (rect.height() * pixels_per_point).round().max(0.0) as u32,
    )
}

/// Draws resampled rasters into a viewport at physical-pixel positions.
struct EguiCanvas<'a> {
    ctx: &'a egui::Context,
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    pixels_per_point: f32,
    texture: Option<egui::TextureHandle>,
}

impl Canvas for EguiCanvas<'_> {
    fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let color_image = rgba_to_color_image(image);
        if let Some(texture) = &mut self.texture {
            texture.set(color_image, egui::TextureOptions::NEAREST);
        } else {
            self.texture = Some(self.ctx.load_texture(
                "glimpse-surface",
                color_image,
                egui::TextureOptions::NEAREST,
            ));
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let ppp = self.pixels_per_point;
        let min = self.origin + egui::vec2(x as f32 / ppp, y as f32 / ppp);
        let size = egui::vec2(image.width() as f32 / ppp, image.height() as f32 / ppp);
        draw_image(self.painter, texture.id(), egui::Rect::from_min_size(min, size));
    }
}

fn draw_image(painter: &egui::Painter, texture_id: egui::TextureId, img_rect: egui::Rect) {
    painter.image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}
