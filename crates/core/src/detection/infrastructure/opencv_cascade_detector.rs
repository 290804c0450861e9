use std::path::Path;

use opencv::core::{Mat, Rect, Scalar, Size, Vector, CV_8UC1, CV_8UC3};
use opencv::imgproc;
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::object_detector::{DetectionParams, DetectorError, ObjectDetector};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Haar cascade detection through OpenCV's `CascadeClassifier`.
///
/// The classifier is loaded on every call and dropped afterwards, so
/// concurrent calls never share OpenCV state.
pub struct OpencvCascadeDetector;

impl OpencvCascadeDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OpencvCascadeDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn load_classifier(cascade: &Path) -> Result<CascadeClassifier, DetectorError> {
    let load_err = |reason: String| DetectorError::CascadeLoad {
        path: cascade.to_path_buf(),
        reason,
    };
    let path = cascade
        .to_str()
        .ok_or_else(|| load_err("path is not valid UTF-8".into()))?;
    if !cascade.exists() {
        return Err(load_err("file not found".into()));
    }
    let classifier = CascadeClassifier::new(path).map_err(|e| load_err(e.to_string()))?;
    if classifier.empty().map_err(|e| load_err(e.to_string()))? {
        return Err(load_err("not a cascade definition".into()));
    }
    Ok(classifier)
}

/// Copies a frame into an owned BGR (or single-channel) `Mat`.
fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let typ = if frame.channels() == 1 { CV_8UC1 } else { CV_8UC3 };
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        typ,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    if frame.channels() == 1 {
        return Ok(mat);
    }
    let mut bgr = Mat::default();
    imgproc::cvt_color_def(&mat, &mut bgr, imgproc::COLOR_RGB2BGR)?;
    Ok(bgr)
}

impl ObjectDetector for OpencvCascadeDetector {
    fn detect(
        &self,
        frame: &Frame,
        cascade: &Path,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, DetectorError> {
        let mut classifier = load_classifier(cascade)?;
        let mat = frame_to_mat(frame).map_err(|e| DetectorError::Detection(e.to_string()))?;

        let mut found = Vector::<Rect>::new();
        classifier
            .detect_multi_scale(
                &mat,
                &mut found,
                params.scale_factor,
                params.min_neighbors,
                params.flags,
                Size::new(0, 0),
                Size::new(0, 0),
            )
            .map_err(|e| DetectorError::Detection(e.to_string()))?;

        Ok(found
            .iter()
            .map(|r| Region::new(r.x, r.y, r.width, r.height))
            .collect())
    }
}
