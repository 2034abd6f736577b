use std::io;
use std::path::{Component, Path, PathBuf};

use image::ImageError;

use tracing::debug;

use crate::config::ResourceConfig;
use crate::consts::DEFAULT_RESOURCE_ROOT;
use crate::error::{GlimpseError, Result};
use crate::source::Origin;

/// Raw bytes of an image together with where they were found.
#[derive(Clone, Debug)]
pub struct ByteSource {
    pub requested: PathBuf,
    pub origin: Origin,
    pub bytes: Vec<u8>,
}

/// Turns a path string into readable bytes.
///
/// The literal filesystem path wins; otherwise the same relative name is
/// looked up under each bundled-resource root, in order.
#[derive(Clone, Debug)]
pub struct ResourceResolver {
    roots: Vec<PathBuf>,
}

impl ResourceResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Configured roots, followed by the `resources` directory shipped next
    /// to the running executable when there is one.
    pub fn from_config(config: &ResourceConfig) -> Self {
        let mut roots = config.roots.clone();
        if let Some(bundled) = executable_resource_root() {
            if !roots.contains(&bundled) {
                roots.push(bundled);
            }
        }
        Self::new(roots)
    }

    /// Find the file backing `path` without reading it.
    pub fn locate(&self, path: &Path) -> Result<Origin> {
        if path.is_file() {
            debug!(path = %path.display(), "resolved on filesystem");
            return Ok(Origin::File(path.to_path_buf()));
        }

        if let Some(name) = resource_name(path) {
            for root in &self.roots {
                let candidate = root.join(&name);
                if candidate.is_file() {
                    debug!(
                        path = %path.display(),
                        root = %root.display(),
                        "resolved as bundled resource"
                    );
                    return Ok(Origin::Resource {
                        root: root.clone(),
                        path: candidate,
                    });
                }
            }
        }

        Err(GlimpseError::NotFound {
            path: path.to_path_buf(),
        })
    }

    /// Locate `path` and read its bytes.
    ///
    /// A file that vanished before the read is `NotFound`; any other read
    /// failure is `Decode`.
    pub fn resolve(&self, path: &Path) -> Result<ByteSource> {
        let origin = self.locate(path)?;
        let bytes = std::fs::read(origin.path()).map_err(|err| read_error(path, err))?;
        Ok(ByteSource {
            requested: path.to_path_buf(),
            origin,
            bytes,
        })
    }
}

impl Default for ResourceResolver {
    fn default() -> Self {
        Self::from_config(&ResourceConfig::default())
    }
}

fn read_error(path: &Path, err: io::Error) -> GlimpseError {
    if err.kind() == io::ErrorKind::NotFound {
        GlimpseError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        GlimpseError::Decode {
            path: path.to_path_buf(),
            source: ImageError::IoError(err),
        }
    }
}

fn executable_resource_root() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let root = exe.parent()?.join(DEFAULT_RESOURCE_ROOT);
    root.is_dir().then_some(root)
}

/// Relative name used for the resource lookup. Leading roots are dropped so
/// `/images/a.png` maps to `<root>/images/a.png`; names that climb out with
/// `..` are never looked up.
fn resource_name(path: &Path) -> Option<PathBuf> {
    let mut name = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => name.push(part),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => return None,
        }
    }
    if name.as_os_str().is_empty() {
        None
    } else {
        Some(name)
    }
}
