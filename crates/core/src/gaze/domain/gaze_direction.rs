use serde::{Deserialize, Serialize};

/// Side the eyes are turned towards, from the image's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GazeDirection {
    Left,
    Right,
}

impl GazeDirection {
    /// Numeric code: 0 for left, 1 for right.
    pub fn code(self) -> u8 {
        match self {
            GazeDirection::Left => 0,
            GazeDirection::Right => 1,
        }
    }
}

impl std::fmt::Display for GazeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GazeDirection::Left => write!(f, "left"),
            GazeDirection::Right => write!(f, "right"),
        }
    }
}
