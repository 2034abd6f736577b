use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlimpseError {
    #[error("Image not found: {} (checked filesystem and bundled resources)", path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Surface error: {0}")]
    Surface(String),
}

impl GlimpseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GlimpseError::NotFound { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, GlimpseError::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, GlimpseError>;
