use std::sync::Arc;

use crate::detection::domain::object_detector::{DetectionParams, ObjectDetector};
use crate::gaze::domain::gaze_direction::GazeDirection;
use crate::pipeline::gaze_classifier::GazeClassifier;
use crate::shared::cascade_config::CascadeConfig;
use crate::shared::error::GazeError;
use crate::shared::frame::Frame;
use crate::shared::settings::Settings;

/// Single-image gaze pipeline: grayscale → detect face → crop → classify eyes.
///
/// Holds no per-call state, so one instance can classify from several
/// threads at once as long as the detector is reentrant.
pub struct ClassifyGazeUseCase {
    detector: Arc<dyn ObjectDetector>,
    cascades: CascadeConfig,
    params: DetectionParams,
    classifier: GazeClassifier,
}

impl ClassifyGazeUseCase {
    pub fn new(cascades: CascadeConfig, detector: Box<dyn ObjectDetector>) -> Self {
        Self::with_settings(cascades, detector, &Settings::default())
    }

    pub fn with_settings(
        cascades: CascadeConfig,
        detector: Box<dyn ObjectDetector>,
        settings: &Settings,
    ) -> Self {
        let detector: Arc<dyn ObjectDetector> = Arc::from(detector);
        let params = settings.detection_params();
        let classifier = GazeClassifier::new(detector.clone(), cascades.eye_path())
            .with_params(params)
            .with_darkness(settings.darkness)
            .with_eye_regions(settings.eye_regions)
            .with_grayscale_eye_pass(settings.eye_pass_grayscale);
        Self {
            detector,
            cascades,
            params,
            classifier,
        }
    }

    pub fn classify_gaze(&self, image: &Frame) -> Result<GazeDirection, GazeError> {
        if image.is_empty() {
            return Err(GazeError::InvalidImage(format!(
                "image has zero size ({}x{})",
                image.width(),
                image.height()
            )));
        }
        image.check_layout()?;
        let face_cascade = self.cascades.face()?;

        let gray = image.to_grayscale();
        let faces = self.detector.detect(&gray, face_cascade, &self.params)?;
        log::debug!("Face detector returned {} candidate(s)", faces.len());

        // Detector order is kept: the first hit is used, not the largest
        let face = faces.first().ok_or(GazeError::NoFaceDetected)?;
        let crop = image
            .crop(face)
            .ok_or_else(|| GazeError::RegionOutOfBounds {
                region: *face,
                width: image.width(),
                height: image.height(),
            })?;
        log::debug!("Using face {face}");

        self.classifier.get_eye_side(&crop)
    }
}
