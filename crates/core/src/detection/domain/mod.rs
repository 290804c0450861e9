pub mod largest_regions;
pub mod object_detector;
