pub const FACE_CASCADE_NAME: &str = "haarcascade_frontalface_default.xml";
pub const FACE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_frontalface_default.xml";

pub const EYE_CASCADE_NAME: &str = "haarcascade_eye.xml";
pub const EYE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_eye.xml";

/// Pyramid step between detector scales.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 1;

/// Number of eye candidates that contribute to the tally.
pub const DEFAULT_EYE_REGIONS: usize = 2;
/// Upper bound accepted for the configured number of eye regions.
pub const MAX_EYE_REGIONS: usize = 16;

/// Legacy packed ARGB darkness cutoff (`#333333`, fully opaque).
pub const PACKED_DARKNESS_THRESHOLD: u32 = 0xFF33_3333;
pub const CHANNEL_DARKNESS_THRESHOLD: u8 = 0x33;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
