use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ImageReadError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Loads a still image as an RGB [`Frame`].
///
/// Decoding lives behind this trait so use cases can be tested with
/// in-memory frames.
pub trait ImageReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<Frame, ImageReadError>;
}
