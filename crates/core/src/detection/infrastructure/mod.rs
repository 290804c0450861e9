#[cfg(feature = "opencv")]
pub mod opencv_cascade_detector;
