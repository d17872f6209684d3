use core::fmt;
use serde::{Deserialize, Serialize};

/// Absolute tile coordinate: `x`, `y` and `plane`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.plane)
    }
}
