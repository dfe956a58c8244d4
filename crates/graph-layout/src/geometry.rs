use serde::{Deserialize, Serialize};

/// 2D vector with f32 coordinates, used for node sizes (`x` is the width,
/// `y` the height)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a zero vector
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// 2D point with f32 coordinates
///
/// Layout positions are the top-left corner of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
