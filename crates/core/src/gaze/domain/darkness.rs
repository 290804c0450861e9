use serde::{Deserialize, Serialize};

use crate::shared::constants::CHANNEL_DARKNESS_THRESHOLD;

/// Decides whether a pixel counts as dark.
///
/// `PackedRgb` reproduces the legacy comparison bit for bit: the pixel is
/// packed as opaque ARGB (`0xFF_RR_GG_BB`) and compared as a signed 32-bit
/// integer against the threshold, also read as signed. With both operands
/// opaque this is the unsigned 24-bit comparison `RRGGBB <= threshold & 0xFFFFFF`,
/// so red dominates: `#00FFFF` is dark, `#340000` is not.
///
/// `PerChannel` counts a pixel as dark when every channel is at or below
/// the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "threshold")]
pub enum DarknessRule {
    PackedRgb(u32),
    PerChannel(u8),
}

impl Default for DarknessRule {
    fn default() -> Self {
        DarknessRule::PerChannel(CHANNEL_DARKNESS_THRESHOLD)
    }
}

impl DarknessRule {
    pub fn is_dark(&self, [r, g, b]: [u8; 3]) -> bool {
        match *self {
            DarknessRule::PackedRgb(threshold) => {
                (pack_opaque_argb(r, g, b) as i32) <= (threshold as i32)
            }
            DarknessRule::PerChannel(max) => r <= max && g <= max && b <= max,
        }
    }
}

fn pack_opaque_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}
