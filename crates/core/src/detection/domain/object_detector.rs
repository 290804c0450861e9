use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("failed to load cascade {path}: {reason}")]
    CascadeLoad { path: PathBuf, reason: String },
    #[error("{0}")]
    Detection(String),
}

/// Multi-scale search parameters handed to the detector unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    pub scale_factor: f64,
    pub min_neighbors: i32,
    pub flags: i32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            flags: 0,
        }
    }
}

/// Domain interface for cascade-based object detection.
///
/// Returns candidate regions in detector order; callers assume nothing
/// beyond "index 0 exists iff something was found". Takes `&self` so one
/// detector can serve concurrent classifications; implementations must be
/// reentrant.
pub trait ObjectDetector: Send + Sync {
    fn detect(
        &self,
        frame: &Frame,
        cascade: &Path,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, DetectorError>;
}
