//! Grid and pixel coordinates

use serde::{Deserialize, Serialize};

/// Offset-row hex coordinates (q = column, r = row)
///
/// Not true axial coordinates: odd rows are shifted right by half a column.
/// Any pair of integers is representable; bounds are the grid's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Whether this row is shifted right by half a column
    pub fn is_odd_row(&self) -> bool {
        self.r.rem_euclid(2) == 1
    }
}

impl From<(i32, i32)> for Hex {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

/// Screen / world-space position
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: f32,
    pub y: f32,
}

impl Pixel {
    pub const ORIGIN: Pixel = Pixel::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions
    pub fn distance_to(&self, other: Pixel) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Pixel {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}
