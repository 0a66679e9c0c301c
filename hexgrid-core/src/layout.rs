//! Pointy-top hex layout with odd rows shifted right ("odd-r")
//!
//! Forward transform is exact; the inverse is a nearest-cell heuristic
//! (round the row, undo the odd-row shift, round the column). Pixels near
//! the slanted edges can resolve to a neighbouring cell. That is accepted:
//! it is only used to pick the tile under a pointer.

use crate::coord::{Hex, Pixel};
use serde::{Deserialize, Serialize};

/// sqrt(3) / 2
const APOTHEM_RATIO: f32 = 0.866_025_4;

/// Corner angles are 60° apart starting at -30°, which puts a corner at
/// the top and flat edges left and right.
const CORNER_ANGLE_OFFSET_DEG: f32 = -30.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    /// Centre-to-corner distance
    pub radius: f32,
    /// Pixel position of the centre of tile (0, 0)
    #[serde(default)]
    pub origin: Pixel,
}

impl HexLayout {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            origin: Pixel::ORIGIN,
        }
    }

    pub fn with_origin(mut self, origin: Pixel) -> Self {
        self.origin = origin;
        self
    }

    /// Layout whose origin puts the middle of a `width` x `height` grid at (0, 0)
    pub fn centered(radius: f32, width: u32, height: u32) -> Self {
        let layout = Self::new(radius);
        let extent = layout.extent(width, height);
        layout.with_origin(Pixel::new(-extent.x / 2.0, -extent.y / 2.0))
    }

    /// Centre-to-edge distance
    pub fn apothem(&self) -> f32 {
        APOTHEM_RATIO * self.radius
    }

    pub fn horizontal_spacing(&self) -> f32 {
        2.0 * self.apothem()
    }

    /// Row pitch of 1.5 radii; rows interlock by half a corner
    pub fn vertical_spacing(&self) -> f32 {
        1.5 * self.radius
    }

    /// Centre of a tile
    pub fn hex_to_pixel(&self, hex: Hex) -> Pixel {
        let mut x = hex.q as f32 * self.horizontal_spacing();
        let y = hex.r as f32 * self.vertical_spacing();

        if hex.is_odd_row() {
            x += self.apothem();
        }

        Pixel::new(x + self.origin.x, y + self.origin.y)
    }

    /// Nearest tile to a pixel (may be outside any grid)
    pub fn pixel_to_hex(&self, pixel: Pixel) -> Hex {
        let mut x = pixel.x - self.origin.x;
        let y = pixel.y - self.origin.y;

        let r = (y / self.vertical_spacing()).round() as i32;
        if r.rem_euclid(2) == 1 {
            x -= self.horizontal_spacing() / 2.0;
        }
        let q = (x / self.horizontal_spacing()).round() as i32;

        Hex::new(q, r)
    }

    /// The six corners of a hex around `center`, clockwise from upper right
    pub fn corners(&self, center: Pixel) -> [Pixel; 6] {
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f32 + CORNER_ANGLE_OFFSET_DEG).to_radians();
            Pixel::new(
                center.x + self.radius * angle.cos(),
                center.y + self.radius * angle.sin(),
            )
        })
    }

    /// Distance between the centres of the outermost tiles of a grid
    pub fn extent(&self, width: u32, height: u32) -> Pixel {
        let columns = width.saturating_sub(1) as f32;
        let rows = height.saturating_sub(1) as f32;

        let mut x = columns * self.horizontal_spacing();
        if height > 1 {
            x += self.apothem();
        }

        Pixel::new(x, rows * self.vertical_spacing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_spacing() {
        let layout = HexLayout::new(10.0);
        assert!(approx(layout.apothem(), 8.660254));
        assert!(approx(layout.horizontal_spacing(), 17.320508));
        assert!(approx(layout.vertical_spacing(), 15.0));
    }

    #[test]
    fn test_forward_transform() {
        let layout = HexLayout::new(10.0);

        let p = layout.hex_to_pixel(Hex::new(0, 0));
        assert_eq!(p, Pixel::ORIGIN);

        let p = layout.hex_to_pixel(Hex::new(2, 0));
        assert!(approx(p.x, 34.641016));
        assert!(approx(p.y, 0.0));

        // Odd row shifted by one apothem
        let p = layout.hex_to_pixel(Hex::new(0, 1));
        assert!(approx(p.x, 8.660254));
        assert!(approx(p.y, 15.0));
    }

    #[test]
    fn test_origin_is_applied_both_ways() {
        let layout = HexLayout::new(40.0).with_origin(Pixel::new(100.0, 100.0));
        assert_eq!(layout.hex_to_pixel(Hex::new(0, 0)), Pixel::new(100.0, 100.0));
        assert_eq!(layout.pixel_to_hex(Pixel::new(100.0, 100.0)), Hex::new(0, 0));
        assert_eq!(layout.pixel_to_hex(Pixel::new(0.0, 0.0)), Hex::new(-1, -2));
    }

    #[test]
    fn test_round_trip_at_centres() {
        let layout = HexLayout::new(40.0);
        for q in -3..20 {
            for r in -3..12 {
                let hex = Hex::new(q, r);
                assert_eq!(layout.pixel_to_hex(layout.hex_to_pixel(hex)), hex);
            }
        }
    }

    #[test]
    fn test_small_offsets_stay_in_cell() {
        let layout = HexLayout::new(40.0);
        let hex = Hex::new(3, 5);
        let c = layout.hex_to_pixel(hex);
        for (dx, dy) in [(5.0, 0.0), (-5.0, 0.0), (0.0, 5.0), (0.0, -5.0)] {
            assert_eq!(layout.pixel_to_hex(Pixel::new(c.x + dx, c.y + dy)), hex);
        }
    }

    #[test]
    fn test_corners_pointy_top() {
        let layout = HexLayout::new(10.0);
        let corners = layout.corners(Pixel::ORIGIN);

        // i = 0 is at -30°: upper right
        assert!(approx(corners[0].x, 8.660254));
        assert!(approx(corners[0].y, -5.0));
        // i = 2 is at 90°: straight down the y axis
        assert!(approx(corners[2].x, 0.0));
        assert!(approx(corners[2].y, 10.0));
        // i = 5 is at 270°: the opposite point
        assert!(approx(corners[5].x, 0.0));
        assert!(approx(corners[5].y, -10.0));

        for c in corners {
            assert!(approx(c.distance_to(Pixel::ORIGIN), 10.0));
        }
    }

    #[test]
    fn test_extent_and_centering() {
        let layout = HexLayout::new(10.0);
        assert_eq!(layout.extent(1, 1), Pixel::ORIGIN);

        let extent = layout.extent(4, 3);
        assert!(approx(extent.x, 3.0 * 17.320508 + 8.660254));
        assert!(approx(extent.y, 30.0));

        let centered = HexLayout::centered(10.0, 4, 3);
        assert!(approx(centered.origin.x, -extent.x / 2.0));
        assert!(approx(centered.origin.y, -15.0));
        // tile (0, 0) sits on the left edge of the extent
        let p = centered.hex_to_pixel(Hex::new(0, 0));
        assert!(approx(p.x, -extent.x / 2.0));
    }
}
