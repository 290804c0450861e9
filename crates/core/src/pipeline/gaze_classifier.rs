use std::path::PathBuf;
use std::sync::Arc;

use crate::detection::domain::largest_regions;
use crate::detection::domain::object_detector::{DetectionParams, ObjectDetector};
use crate::gaze::domain::dark_pixel_tally::DarkPixelTally;
use crate::gaze::domain::darkness::DarknessRule;
use crate::gaze::domain::gaze_direction::GazeDirection;
use crate::shared::cascade_config::require_path;
use crate::shared::constants::DEFAULT_EYE_REGIONS;
use crate::shared::error::GazeError;
use crate::shared::frame::Frame;

/// Classifies gaze side within a face crop: detect eyes → keep the largest
/// candidates → tally dark pixels per half → compare.
pub struct GazeClassifier {
    detector: Arc<dyn ObjectDetector>,
    eye_cascade: PathBuf,
    params: DetectionParams,
    darkness: DarknessRule,
    eye_regions: usize,
    grayscale_eye_pass: bool,
}

impl GazeClassifier {
    pub fn new(detector: Arc<dyn ObjectDetector>, eye_cascade: impl Into<PathBuf>) -> Self {
        Self {
            detector,
            eye_cascade: eye_cascade.into(),
            params: DetectionParams::default(),
            darkness: DarknessRule::default(),
            eye_regions: DEFAULT_EYE_REGIONS,
            grayscale_eye_pass: false,
        }
    }

    pub fn with_params(mut self, params: DetectionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_darkness(mut self, darkness: DarknessRule) -> Self {
        self.darkness = darkness;
        self
    }

    pub fn with_eye_regions(mut self, eye_regions: usize) -> Self {
        self.eye_regions = eye_regions;
        self
    }

    /// Eye detection normally sees the colour crop while face detection
    /// sees grayscale. This switches the eye pass to grayscale too.
    pub fn with_grayscale_eye_pass(mut self, enabled: bool) -> Self {
        self.grayscale_eye_pass = enabled;
        self
    }

    pub fn get_eye_side(&self, face: &Frame) -> Result<GazeDirection, GazeError> {
        face.check_layout()?;
        let cascade = require_path(&self.eye_cascade, "eye")?;

        let eyes = if self.grayscale_eye_pass {
            self.detector
                .detect(&face.to_grayscale(), cascade, &self.params)?
        } else {
            self.detector.detect(face, cascade, &self.params)?
        };
        log::debug!("Eye detector returned {} candidate(s)", eyes.len());

        let selected = largest_regions::select(eyes, self.eye_regions);
        let mut tally = DarkPixelTally::new();
        for region in selected.regions() {
            tally.accumulate(face, region, &self.darkness)?;
        }

        let verdict = tally.verdict();
        log::debug!(
            "Dark pixel tally left={} right={} -> {verdict}",
            tally.left(),
            tally.right()
        );
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::object_detector::DetectorError;
    use crate::shared::region::Region;
    use std::path::Path;
    use std::sync::Mutex;

    struct StubDetector {
        regions: Vec<Region>,
        seen_channels: Mutex<Vec<u8>>,
    }

    impl StubDetector {
        fn new(regions: Vec<Region>) -> Arc<Self> {
            Arc::new(Self {
                regions,
                seen_channels: Mutex::new(Vec::new()),
            })
        }
    }

    impl ObjectDetector for StubDetector {
        fn detect(
            &self,
            frame: &Frame,
            _cascade: &Path,
            _params: &DetectionParams,
        ) -> Result<Vec<Region>, DetectorError> {
            self.seen_channels.lock().unwrap().push(frame.channels());
            Ok(self.regions.clone())
        }
    }

    struct FailingDetector;

    impl ObjectDetector for FailingDetector {
        fn detect(
            &self,
            _frame: &Frame,
            cascade: &Path,
            _params: &DetectionParams,
        ) -> Result<Vec<Region>, DetectorError> {
            Err(DetectorError::CascadeLoad {
                path: cascade.to_path_buf(),
                reason: "corrupt".into(),
            })
        }
    }

    /// 40x20 face: columns < `dark_until` black, rest white.
    fn face(dark_until: u32) -> Frame {
        let (w, h) = (40u32, 20u32);
        let mut data: Vec<u8> = Vec::with_capacity((w * h * 3) as usize);
        for _y in 0..h {
            for x in 0..w {
                let v: u8 = if x < dark_until { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(data, w, h, 3)
    }

    #[test]
    fn test_no_eyes_resolves_right() {
        let classifier = GazeClassifier::new(StubDetector::new(vec![]), "eye.xml");
        assert_eq!(classifier.get_eye_side(&face(40)).unwrap(), GazeDirection::Right);
    }

    #[test]
    fn test_dark_left_half_of_eye_is_left() {
        // Eye spans columns 0..10, midline at 5
        let eyes = vec![Region::new(0, 0, 10, 10)];
        let classifier = GazeClassifier::new(StubDetector::new(eyes), "eye.xml");
        assert_eq!(classifier.get_eye_side(&face(5)).unwrap(), GazeDirection::Left);
    }

    #[test]
    fn test_only_two_largest_eyes_are_tallied() {
        // Two large eyes sit over white pixels, the small one over black.
        let eyes = vec![
            Region::new(0, 0, 4, 4),
            Region::new(10, 0, 10, 10),
            Region::new(25, 0, 10, 10),
        ];
        let classifier = GazeClassifier::new(StubDetector::new(eyes), "eye.xml");
        assert_eq!(classifier.get_eye_side(&face(4)).unwrap(), GazeDirection::Right);
    }

    #[test]
    fn test_three_eye_regions_includes_small_candidate() {
        let eyes = vec![
            Region::new(0, 0, 4, 4),
            Region::new(10, 0, 10, 10),
            Region::new(25, 0, 10, 10),
        ];
        let classifier =
            GazeClassifier::new(StubDetector::new(eyes), "eye.xml").with_eye_regions(3);
        assert_eq!(classifier.get_eye_side(&face(4)).unwrap(), GazeDirection::Left);
    }

    #[test]
    fn test_rgba_face_is_invalid() {
        let detector = StubDetector::new(vec![Region::new(0, 0, 4, 4)]);
        let classifier = GazeClassifier::new(detector.clone(), "eye.xml");
        let rgba = Frame::new(vec![0u8; 8 * 8 * 4], 8, 8, 4);
        let err = classifier.get_eye_side(&rgba).unwrap_err();
        assert!(matches!(err, GazeError::InvalidImage(_)));
        assert!(detector.seen_channels.lock().unwrap().is_empty());
    }

    #[test]
    fn test_eye_pass_sees_colour_by_default() {
        let detector = StubDetector::new(vec![]);
        let classifier = GazeClassifier::new(detector.clone(), "eye.xml");
        classifier.get_eye_side(&face(0)).unwrap();
        assert_eq!(*detector.seen_channels.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_grayscale_eye_pass_opt_in() {
        let detector = StubDetector::new(vec![]);
        let classifier =
            GazeClassifier::new(detector.clone(), "eye.xml").with_grayscale_eye_pass(true);
        classifier.get_eye_side(&face(0)).unwrap();
        assert_eq!(*detector.seen_channels.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_empty_eye_cascade_fails_before_detection() {
        let detector = StubDetector::new(vec![]);
        let classifier = GazeClassifier::new(detector.clone(), "");
        let err = classifier.get_eye_side(&face(0)).unwrap_err();
        assert!(matches!(err, GazeError::Configuration(_)));
        assert!(detector.seen_channels.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unloadable_cascade_is_configuration_error() {
        let classifier = GazeClassifier::new(Arc::new(FailingDetector), "eye.xml");
        let err = classifier.get_eye_side(&face(0)).unwrap_err();
        assert!(matches!(err, GazeError::Configuration(_)));
    }

    #[test]
    fn test_eye_outside_face_is_out_of_bounds() {
        let eyes = vec![Region::new(100, 100, 10, 10)];
        let classifier = GazeClassifier::new(StubDetector::new(eyes), "eye.xml");
        let err = classifier.get_eye_side(&face(0)).unwrap_err();
        assert!(matches!(err, GazeError::RegionOutOfBounds { .. }));
    }

    #[test]
    fn test_packed_rule_changes_verdict_for_cyan() {
        // Left half cyan (#00FFFF), right half white: dark only under the packed rule
        const CYAN: [u8; 3] = [0, 255, 255];
        const WHITE: [u8; 3] = [255, 255, 255];
        let (w, h) = (10u32, 10u32);
        let mut data: Vec<u8> = Vec::new();
        for _y in 0..h {
            for x in 0..w {
                data.extend_from_slice(if x < 5 { &CYAN } else { &WHITE });
            }
        }
        let frame = Frame::new(data, w, h, 3);
        let eyes = vec![Region::new(0, 0, 10, 10)];

        let per_channel = GazeClassifier::new(StubDetector::new(eyes.clone()), "eye.xml");
        assert_eq!(per_channel.get_eye_side(&frame).unwrap(), GazeDirection::Right);

        let packed = GazeClassifier::new(StubDetector::new(eyes), "eye.xml")
            .with_darkness(DarknessRule::PackedRgb(0xFF33_3333));
        assert_eq!(packed.get_eye_side(&frame).unwrap(), GazeDirection::Left);
    }
}
