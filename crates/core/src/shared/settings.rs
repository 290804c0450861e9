use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::object_detector::DetectionParams;
use crate::gaze::domain::darkness::DarknessRule;
use crate::shared::constants::{
    DEFAULT_EYE_REGIONS, DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR, MAX_EYE_REGIONS,
};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Tunables for a classification run. Every field has a default, so a
/// settings file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub face_cascade: Option<PathBuf>,
    pub eye_cascade: Option<PathBuf>,
    pub scale_factor: f64,
    pub min_neighbors: i32,
    pub eye_regions: usize,
    pub darkness: DarknessRule,
    /// Run eye detection on a grayscale copy instead of the colour crop.
    pub eye_pass_grayscale: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            face_cascade: None,
            eye_cascade: None,
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            eye_regions: DEFAULT_EYE_REGIONS,
            darkness: DarknessRule::default(),
            eye_pass_grayscale: false,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("EyeSide").join("settings.json"))
    }

    /// Loads the settings file at the default location, falling back to
    /// defaults when it doesn't exist.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Settings = serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        settings.validate()?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.scale_factor > 1.0) {
            return Err(SettingsError::Invalid(format!(
                "scale_factor must be greater than 1.0, got {}",
                self.scale_factor
            )));
        }
        if self.min_neighbors < 0 {
            return Err(SettingsError::Invalid(format!(
                "min_neighbors must be non-negative, got {}",
                self.min_neighbors
            )));
        }
        if self.eye_regions == 0 || self.eye_regions > MAX_EYE_REGIONS {
            return Err(SettingsError::Invalid(format!(
                "eye_regions must be between 1 and {MAX_EYE_REGIONS}, got {}",
                self.eye_regions
            )));
        }
        Ok(())
    }

    pub fn detection_params(&self) -> DetectionParams {
        DetectionParams {
            scale_factor: self.scale_factor,
            min_neighbors: self.min_neighbors,
            flags: 0,
        }
    }
}
