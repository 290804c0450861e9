pub mod dark_pixel_tally;
pub mod darkness;
pub mod gaze_direction;
