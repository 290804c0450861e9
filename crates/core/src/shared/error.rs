use thiserror::Error;

use crate::detection::domain::object_detector::DetectorError;
use crate::shared::region::Region;

/// Failures surfaced by gaze classification. A call either yields a
/// verdict or one of these; there is no partial result.
#[derive(Error, Debug)]
pub enum GazeError {
    #[error("cascade configuration error: {0}")]
    Configuration(String),
    #[error("no face detected")]
    NoFaceDetected,
    #[error("detection failed: {0}")]
    Detection(String),
    #[error("region {region} lies outside the {width}x{height} image")]
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

impl From<DetectorError> for GazeError {
    fn from(err: DetectorError) -> Self {
        match err {
            DetectorError::CascadeLoad { .. } => GazeError::Configuration(err.to_string()),
            DetectorError::Detection(_) => GazeError::Detection(err.to_string()),
        }
    }
}
