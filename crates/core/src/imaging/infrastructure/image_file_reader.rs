use std::path::Path;

use crate::imaging::domain::image_reader::{ImageReadError, ImageReader};
use crate::shared::frame::Frame;

/// Decodes image files with the `image` crate, converting every format
/// to 8-bit RGB. Alpha is dropped.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, ImageReadError> {
        let img = image::open(path).map_err(|e| ImageReadError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?;
        let frame = Frame::from_rgb_image(img.to_rgb8());
        log::debug!(
            "Read {} ({}x{})",
            path.display(),
            frame.width(),
            frame.height()
        );
        Ok(frame)
    }
}
