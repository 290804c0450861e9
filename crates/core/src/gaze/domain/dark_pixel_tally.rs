use crate::gaze::domain::darkness::DarknessRule;
use crate::gaze::domain::gaze_direction::GazeDirection;
use crate::shared::error::GazeError;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Dark pixel counts split by the half of the eye region they fall in.
///
/// Lives for one classification call; counters only ever grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DarkPixelTally {
    left: u64,
    right: u64,
}

impl DarkPixelTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(&self) -> u64 {
        self.left
    }

    pub fn right(&self) -> u64 {
        self.right
    }

    /// Counts dark pixels of `region` in `frame`.
    ///
    /// Scans columns `x..x + width - 1` and rows `y..y + height - 1`, so
    /// the last column and row are never visited and a 1x1 region adds
    /// nothing. A column left of `x + width / 2` counts towards `left`.
    pub fn accumulate(
        &mut self,
        frame: &Frame,
        region: &Region,
        rule: &DarknessRule,
    ) -> Result<(), GazeError> {
        let x_end = region.x as i64 + region.width as i64 - 1;
        let y_end = region.y as i64 + region.height as i64 - 1;
        if x_end <= region.x as i64 || y_end <= region.y as i64 {
            return Ok(());
        }
        if region.x < 0
            || region.y < 0
            || x_end > frame.width() as i64
            || y_end > frame.height() as i64
        {
            return Err(GazeError::RegionOutOfBounds {
                region: *region,
                width: frame.width(),
                height: frame.height(),
            });
        }

        let midline = region.x as i64 + (region.width / 2) as i64;
        for j in region.x as i64..x_end {
            for k in region.y as i64..y_end {
                if rule.is_dark(frame.rgb_at(j as usize, k as usize)) {
                    if j < midline {
                        self.left += 1;
                    } else {
                        self.right += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// `Left` only when strictly more dark pixels sit on the left.
    pub fn verdict(&self) -> GazeDirection {
        if self.left > self.right {
            GazeDirection::Left
        } else {
            GazeDirection::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BLACK: [u8; 3] = [0, 0, 0];
    const WHITE: [u8; 3] = [255, 255, 255];

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> Frame {
        let data = (0..w * h).flat_map(|_| rgb).collect();
        Frame::new(data, w, h, 3)
    }

    /// Columns `< split` get `left`, the rest get `right`.
    fn split(w: u32, h: u32, split: u32, left: [u8; 3], right: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for _y in 0..h {
            for x in 0..w {
                data.extend_from_slice(if x < split { &left } else { &right });
            }
        }
        Frame::new(data, w, h, 3)
    }

    #[test]
    fn test_all_black_region_counts_scanned_pixels() {
        let frame = solid(10, 10, BLACK);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::new(0, 0, 10, 10), &DarknessRule::default())
            .unwrap();
        // 9 scanned columns x 9 scanned rows; midline at x = 5
        assert_eq!(tally.left(), 5 * 9);
        assert_eq!(tally.right(), 4 * 9);
    }

    #[test]
    fn test_left_black_right_white() {
        let frame = split(10, 10, 5, BLACK, WHITE);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::new(0, 0, 10, 10), &DarknessRule::default())
            .unwrap();
        assert_eq!(tally.left(), 45);
        assert_eq!(tally.right(), 0);
        assert_eq!(tally.verdict(), GazeDirection::Left);
    }

    #[test]
    fn test_midline_is_relative_to_region_origin() {
        // Region starts at x = 4, width 6: midline at x = 7
        let frame = split(10, 4, 7, BLACK, WHITE);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::new(4, 0, 6, 4), &DarknessRule::default())
            .unwrap();
        assert_eq!(tally.left(), 3 * 3);
        assert_eq!(tally.right(), 0);
    }

    #[test]
    fn test_odd_width_midline_uses_integer_division() {
        // width 7 -> midline x = 3, scanned columns 0..6
        let frame = solid(7, 2, BLACK);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::new(0, 0, 7, 2), &DarknessRule::default())
            .unwrap();
        assert_eq!(tally.left(), 3);
        assert_eq!(tally.right(), 3);
    }

    #[test]
    fn test_last_row_and_column_are_not_scanned() {
        // Only the last column and last row are dark
        let mut frame_data = Vec::new();
        for y in 0..4u32 {
            for x in 0..4u32 {
                frame_data.extend_from_slice(if x == 3 || y == 3 { &BLACK } else { &WHITE });
            }
        }
        let frame = Frame::new(frame_data, 4, 4, 3);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::new(0, 0, 4, 4), &DarknessRule::default())
            .unwrap();
        assert_eq!(tally, DarkPixelTally::new());
    }

    #[test]
    fn test_sentinel_contributes_nothing() {
        let frame = solid(1, 1, BLACK);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::SENTINEL, &DarknessRule::default())
            .unwrap();
        assert_eq!(tally, DarkPixelTally::new());
    }

    #[rstest]
    #[case::entirely_outside(Region::new(50, 50, 10, 10))]
    #[case::negative_origin(Region::new(-5, 0, 8, 8))]
    #[case::overhangs_right(Region::new(5, 0, 10, 5))]
    #[case::overhangs_bottom(Region::new(0, 5, 5, 10))]
    fn test_out_of_bounds_is_error(#[case] region: Region) {
        let frame = solid(10, 10, BLACK);
        let mut tally = DarkPixelTally::new();
        let err = tally
            .accumulate(&frame, &region, &DarknessRule::default())
            .unwrap_err();
        assert!(matches!(err, GazeError::RegionOutOfBounds { width: 10, height: 10, .. }));
        assert_eq!(tally, DarkPixelTally::new());
    }

    #[test]
    fn test_region_one_past_edge_is_in_bounds() {
        // Scan stops one short of x + width, so a region reaching one pixel
        // past the far edge never reads outside the frame
        let frame = solid(10, 10, BLACK);
        let mut tally = DarkPixelTally::new();
        assert!(tally
            .accumulate(&frame, &Region::new(0, 0, 11, 11), &DarknessRule::default())
            .is_ok());
        assert_eq!(tally.left() + tally.right(), 100);
    }

    #[test]
    fn test_uniform_gray_above_threshold_counts_nothing() {
        let frame = solid(8, 8, [0x80, 0x80, 0x80]);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::new(0, 0, 8, 8), &DarknessRule::default())
            .unwrap();
        assert_eq!(tally, DarkPixelTally::new());
        assert_eq!(tally.verdict(), GazeDirection::Right);
    }

    #[test]
    fn test_accumulates_across_regions() {
        let frame = split(20, 10, 10, BLACK, WHITE);
        let mut tally = DarkPixelTally::new();
        let rule = DarknessRule::default();
        tally.accumulate(&frame, &Region::new(0, 0, 6, 6), &rule).unwrap();
        let after_first = tally;
        tally.accumulate(&frame, &Region::new(12, 0, 6, 6), &rule).unwrap();
        assert_eq!(tally, after_first);
        tally.accumulate(&frame, &Region::new(0, 2, 6, 6), &rule).unwrap();
        assert!(tally.left() > after_first.left());
    }

    #[test]
    fn test_gray_frame_is_readable() {
        let frame = Frame::new(vec![0u8; 16], 4, 4, 1);
        let mut tally = DarkPixelTally::new();
        tally
            .accumulate(&frame, &Region::new(0, 0, 4, 4), &DarknessRule::default())
            .unwrap();
        assert_eq!(tally.left() + tally.right(), 9);
    }

    #[rstest]
    #[case::left_wins(5, 4, GazeDirection::Left)]
    #[case::right_wins(4, 5, GazeDirection::Right)]
    #[case::tie_goes_right(7, 7, GazeDirection::Right)]
    #[case::empty_goes_right(0, 0, GazeDirection::Right)]
    fn test_verdict(#[case] left: u64, #[case] right: u64, #[case] expected: GazeDirection) {
        let tally = DarkPixelTally { left, right };
        assert_eq!(tally.verdict(), expected);
    }
}
