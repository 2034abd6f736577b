use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_RESOURCE_ROOT, DEFAULT_WINDOW_TITLE};
use crate::error::{GlimpseError, Result};
use crate::redraw::RedrawPolicy;
use crate::resample::ResamplePolicy;
use crate::scale::FitPolicy;
use crate::surface::SurfaceMode;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlimpseConfig {
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

impl GlimpseConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GlimpseError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GlimpseError::Config(e.to_string()))
    }

    /// Surface mode derived from the window and render sections.
    pub fn surface_mode(&self) -> SurfaceMode {
        SurfaceMode {
            title: self.window.title.clone(),
            maximized: self.window.maximized,
            undecorated: self.window.undecorated,
            background: self.render.background,
        }
    }
}

/// Bundled-resource lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directories searched, in order, when the literal path does not exist.
    pub roots: Vec<PathBuf>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(DEFAULT_RESOURCE_ROOT)],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub resample: ResamplePolicy,
    pub fit: FitPolicy,
    /// RGB fill behind the image.
    pub background: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resample: ResamplePolicy::default(),
            fit: FitPolicy::default(),
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl RenderConfig {
    pub fn redraw_policy(&self) -> RedrawPolicy {
        RedrawPolicy {
            resample: self.resample,
            fit: self.fit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub maximized: bool,
    pub undecorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_WINDOW_TITLE.to_string(),
            maximized: true,
            undecorated: true,
        }
    }
}
