use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pixel coordinate in the source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Hue of one of the four printed corner markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Green,
    Blue,
    Pink,
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarkerColor::Red => "red",
            MarkerColor::Green => "green",
            MarkerColor::Blue => "blue",
            MarkerColor::Pink => "pink",
        })
    }
}

/// Board corners as seen in the image, already moved from the marker
/// centroids onto the board edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerSet {
    pub upper_left: Point,
    pub upper_right: Point,
    pub lower_left: Point,
    pub lower_right: Point,
}

impl CornerSet {
    /// Corners in the fixed order upper-left, upper-right, lower-left, lower-right.
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_left,
            self.lower_right,
        ]
    }
}
