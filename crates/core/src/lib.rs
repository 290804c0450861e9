//! Gaze side estimation for still images.
//!
//! A face is located with a cascade detector, eyes are located inside the
//! face crop, and the side with more dark pixels across the two largest
//! eye regions decides the verdict. Cascade evaluation itself sits behind
//! [`detection::domain::object_detector::ObjectDetector`].

pub mod detection;
pub mod gaze;
pub mod imaging;
pub mod pipeline;
pub mod shared;
