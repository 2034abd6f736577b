#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use glimpse_core::config::GlimpseConfig;
use glimpse_core::headless::HeadlessWindowing;
use glimpse_core::scale::ViewportSize;
use glimpse_core::session::ViewerSession;

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const GREEN: [u8; 4] = [0, 255, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Solid-color RGBA image.
pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Encode a solid-color image as PNG bytes.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    solid(width, height, color)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

/// Write a solid-color PNG under `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(&path, png_bytes(width, height, color)).expect("write png");
    path
}

/// Session on a headless backend whose resources live under `resource_root`.
pub fn headless_session(
    screen: ViewportSize,
    resource_root: &Path,
) -> (ViewerSession<HeadlessWindowing>, HeadlessWindowing) {
    let windowing = HeadlessWindowing::new(screen);
    let mut config = GlimpseConfig::default();
    config.resources.roots = vec![resource_root.to_path_buf()];
    let session = ViewerSession::from_config(windowing.clone(), &config);
    (session, windowing)
}

pub fn pixel(img: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    img.get_pixel(x, y).0
}
