use std::path::{Path, PathBuf};

use crate::shared::error::GazeError;

/// Locations of the face and eye cascade definitions.
///
/// Captured once at construction and never mutated. Empty paths are
/// accepted here but rejected when the detection step that needs them runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeConfig {
    face: PathBuf,
    eye: PathBuf,
}

impl CascadeConfig {
    pub fn new(face: impl Into<PathBuf>, eye: impl Into<PathBuf>) -> Self {
        Self {
            face: face.into(),
            eye: eye.into(),
        }
    }

    pub fn face(&self) -> Result<&Path, GazeError> {
        require_path(&self.face, "face")
    }

    pub fn eye(&self) -> Result<&Path, GazeError> {
        require_path(&self.eye, "eye")
    }

    /// Eye path as configured, possibly empty. The eye pass checks it when
    /// it runs, after the face pass has already succeeded.
    pub(crate) fn eye_path(&self) -> &Path {
        &self.eye
    }
}

pub(crate) fn require_path<'a>(path: &'a Path, kind: &str) -> Result<&'a Path, GazeError> {
    if path.as_os_str().is_empty() {
        return Err(GazeError::Configuration(format!(
            "{kind} cascade path is not set"
        )));
    }
    Ok(path)
}
