mod common;

use std::path::Path;
use std::sync::Arc;

use glimpse_core::error::GlimpseError;
use glimpse_core::headless::HeadlessWindowing;
use glimpse_core::scale::{ScaledPlacement, ViewportSize};
use glimpse_core::session::SessionState;
use glimpse_core::source::SourceImage;
use glimpse_core::surface::{Surface, SurfaceMode, Windowing};

use common::{headless_session, pixel, solid, write_png, BLACK, BLUE, GREEN, RED};

const SCREEN: ViewportSize = ViewportSize {
    width: 80,
    height: 40,
};

#[test]
fn test_open_shows_maximized_undecorated_surface() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 192, 108, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());

    let info = session.open_image(&path).unwrap();
    assert_eq!((info.width, info.height), (192, 108));
    assert_eq!(session.state(), SessionState::Open);
    assert_eq!(session.source_dimensions(), Some((192, 108)));
    assert_eq!(session.viewport_size(), Some(SCREEN));

    let surfaces = windowing.live_surfaces();
    assert_eq!(surfaces.len(), 1);
    let surface = &surfaces[0];
    assert!(surface.is_visible());
    assert!(surface.mode().maximized);
    assert!(surface.mode().undecorated);

    // Initial show paints once: 192x108 into 80x40 -> 71x40 at (5, 0).
    assert_eq!(surface.paint_count(), 1);
    assert_eq!(
        surface.last_placement(),
        Some(ScaledPlacement {
            scaled_width: 71,
            scaled_height: 40,
            offset_x: 5,
            offset_y: 0,
        })
    );
    let fb = surface.framebuffer().unwrap();
    assert_eq!(fb.dimensions(), (80, 40));
    assert_eq!(pixel(&fb, 0, 20), BLACK);
    assert_eq!(pixel(&fb, 40, 20), RED);
    assert_eq!(pixel(&fb, 79, 20), BLACK);
}

#[test]
fn test_open_from_resource_root() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "baselines/home.png", 4, 4, GREEN);
    let (session, _windowing) = headless_session(SCREEN, dir.path());

    let info = session.open_image(Path::new("baselines/home.png")).unwrap();
    assert!(info.origin.is_resource());
    assert!(session.is_open());
}

#[test]
fn test_close_twice_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 4, 4, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());

    session.open_image(&path).unwrap();
    session.close();
    session.close();

    assert_eq!(session.state(), SessionState::Closed);
    let surfaces = windowing.surfaces();
    assert_eq!(surfaces.len(), 1);
    assert!(surfaces[0].is_closed());
    assert!(!surfaces[0].is_visible());
    assert_eq!(surfaces[0].close_events(), 1);
}

#[test]
fn test_close_without_open_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let (session, windowing) = headless_session(SCREEN, dir.path());

    session.close();
    session.teardown();

    assert_eq!(session.state(), SessionState::Closed);
    assert!(windowing.surfaces().is_empty());
    assert_eq!(session.source_dimensions(), None);
}

#[test]
fn test_reopen_replaces_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_png(dir.path(), "a.png", 8, 4, RED);
    let b = write_png(dir.path(), "b.png", 4, 8, BLUE);
    let (session, windowing) = headless_session(SCREEN, dir.path());

    session.open_image(&a).unwrap();
    session.open_image(&b).unwrap();

    let all = windowing.surfaces();
    assert_eq!(all.len(), 2);
    assert!(all[0].is_closed());
    assert_eq!(all[0].close_events(), 1);

    let live = windowing.live_surfaces();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id(), all[1].id());
    assert_eq!(session.source_dimensions(), Some((4, 8)));

    let fb = live[0].framebuffer().unwrap();
    assert_eq!(pixel(&fb, 40, 20), BLUE);
}

#[test]
fn test_missing_image_fails_and_leaves_closed() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_png(dir.path(), "a.png", 4, 4, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());

    session.open_image(&a).unwrap();
    let err = session
        .open_image(Path::new("does/not/exist.png"))
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(session.state(), SessionState::Closed);
    assert!(windowing.live_surfaces().is_empty());
    assert_eq!(windowing.surfaces().len(), 1);
}

#[test]
fn test_undecodable_image_fails_without_surface() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();
    let (session, windowing) = headless_session(SCREEN, dir.path());

    let err = session.open_image(&path).unwrap_err();
    assert!(err.is_decode());
    assert!(!session.is_open());
    assert!(windowing.surfaces().is_empty());
}

#[test]
fn test_resize_repaints_with_new_viewport() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "wide.png", 200, 100, GREEN);
    let (session, windowing) = headless_session(SCREEN, dir.path());
    session.open_image(&path).unwrap();

    let surface = windowing.live_surfaces().remove(0);
    surface.resize(ViewportSize::new(50, 50));

    assert_eq!(surface.paint_count(), 2);
    assert_eq!(
        surface.last_placement(),
        Some(ScaledPlacement {
            scaled_width: 50,
            scaled_height: 25,
            offset_x: 0,
            offset_y: 13,
        })
    );
    assert_eq!(session.viewport_size(), Some(ViewportSize::new(50, 50)));
}

#[test]
fn test_collapsed_surface_skips_draw() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 100, 50, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());
    session.open_image(&path).unwrap();

    let surface = windowing.live_surfaces().remove(0);
    surface.resize(ViewportSize::ZERO);

    assert_eq!(surface.last_placement(), None);
    assert_eq!(surface.framebuffer().unwrap().dimensions(), (0, 0));
}

#[test]
fn test_closed_surface_no_longer_paints() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 4, 4, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());
    session.open_image(&path).unwrap();
    let surface = windowing.live_surfaces().remove(0);

    session.close();
    assert_eq!(surface.paint(), None);
    assert_eq!(surface.framebuffer(), None);
}

#[test]
fn test_open_decoded_image() {
    let dir = tempfile::tempdir().unwrap();
    let (session, windowing) = headless_session(SCREEN, dir.path());

    session.open(SourceImage::new(solid(10, 10, GREEN))).unwrap();
    assert!(session.is_open());
    assert_eq!(session.current_info(), None);
    assert_eq!(
        session.with_surface(|s| s.size()),
        Some(SCREEN)
    );
    assert_eq!(windowing.live_surfaces().len(), 1);
}

#[test]
fn test_teardown_closes_open_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 4, 4, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());
    session.open_image(&path).unwrap();

    session.teardown();
    assert!(!session.is_open());
    assert!(windowing.live_surfaces().is_empty());
}

#[test]
fn test_drop_closes_surface() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 4, 4, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());
    session.open_image(&path).unwrap();

    drop(session);
    assert!(windowing.live_surfaces().is_empty());
}

#[test]
fn test_session_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_png(dir.path(), "a.png", 4, 4, RED);
    let b = write_png(dir.path(), "b.png", 4, 4, BLUE);
    let (session, windowing) = headless_session(SCREEN, dir.path());
    let session = Arc::new(session);

    let handles: Vec<_> = [a, b]
        .into_iter()
        .map(|path| {
            let session = Arc::clone(&session);
            std::thread::spawn(move || session.open_image(&path).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(windowing.surfaces().len(), 2);
    assert_eq!(windowing.live_surfaces().len(), 1);
    session.teardown();
    assert!(windowing.live_surfaces().is_empty());
}

#[cfg(target_os = "linux")]
#[test]
fn test_unreadable_image_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let (session, windowing) = headless_session(SCREEN, dir.path());

    // Listed as a regular file, but reading it from offset 0 fails.
    let err = session.open_image(Path::new("/proc/self/mem")).unwrap_err();
    assert!(err.is_decode(), "unexpected error: {err:?}");
    assert!(!session.is_open());
    assert!(windowing.surfaces().is_empty());
}

#[test]
fn test_failed_decode_closes_previous_window() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_png(dir.path(), "a.png", 4, 4, RED);
    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"not a png").unwrap();
    let (session, windowing) = headless_session(SCREEN, dir.path());

    session.open_image(&a).unwrap();
    let err = session.open_image(&broken).unwrap_err();

    assert!(err.is_decode());
    assert_eq!(session.state(), SessionState::Closed);
    assert!(windowing.live_surfaces().is_empty());
    assert_eq!(windowing.surfaces()[0].close_events(), 1);
}

#[test]
fn test_window_system_close_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 4, 4, RED);
    let (session, windowing) = headless_session(SCREEN, dir.path());
    session.open_image(&path).unwrap();
    assert!(session.current_info().is_some());

    let mut surface = windowing.live_surfaces().remove(0);
    surface.close();

    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.current_info(), None);
    assert_eq!(session.viewport_size(), None);

    // A later close has nothing left to release.
    session.close();
    assert_eq!(surface.close_events(), 1);
}

#[test]
fn test_closed_surface_cannot_be_shown() {
    let windowing = HeadlessWindowing::new(SCREEN);
    let mut surface = windowing.create_surface(SurfaceMode::default()).unwrap();
    surface.close();

    let err = surface.show().unwrap_err();
    assert!(matches!(err, GlimpseError::Surface(_)));
    assert!(!surface.is_visible());
    assert_eq!(surface.paint_count(), 0);
}
