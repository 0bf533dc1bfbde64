use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain classification for a cell. 0 is open ground, 1 is a permanent
/// wall, and 2 or above is high terrain: passable until revealed.
pub type Terrain = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    // The `x-y` form used by edge-file tokens and trace lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Objective {
    pub target: Coord,
    /// Terrain types the agent may clear before pathing here; empty means
    /// "just path there".
    pub options: Vec<Terrain>,
}

impl Objective {
    pub fn new(target: Coord, options: Vec<Terrain>) -> Self {
        Self { target, options }
    }
}
