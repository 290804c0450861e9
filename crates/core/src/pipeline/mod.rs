pub mod classify_gaze_use_case;
pub mod classify_image_use_case;
pub mod gaze_classifier;
