use std::path::Path;

use thiserror::Error;

use crate::gaze::domain::gaze_direction::GazeDirection;
use crate::imaging::domain::image_reader::{ImageReadError, ImageReader};
use crate::pipeline::classify_gaze_use_case::ClassifyGazeUseCase;
use crate::shared::error::GazeError;

#[derive(Error, Debug)]
pub enum ClassifyImageError {
    #[error(transparent)]
    Read(#[from] ImageReadError),
    #[error(transparent)]
    Gaze(#[from] GazeError),
}

/// File-based wrapper: read → classify.
pub struct ClassifyImageUseCase {
    reader: Box<dyn ImageReader>,
    classify: ClassifyGazeUseCase,
}

impl ClassifyImageUseCase {
    pub fn new(reader: Box<dyn ImageReader>, classify: ClassifyGazeUseCase) -> Self {
        Self { reader, classify }
    }

    pub fn execute(&self, input_path: &Path) -> Result<GazeDirection, ClassifyImageError> {
        let frame = self.reader.read(input_path)?;
        let direction = self.classify.classify_gaze(&frame)?;
        log::info!("{}: {direction}", input_path.display());
        Ok(direction)
    }
}
