//! Geometry primitives: [`Point`] and the [`Viewport`] box mapping canvas
//! pixels to map cells.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer cell coordinate. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Pixel margin kept around the viewport box when fitting it to a canvas.
const FIT_MARGIN: f64 = 10.0;

/// The square box, in canvas pixel coordinates, that the map is drawn into.
///
/// Pointer positions are resolved to cell coordinates relative to this box;
/// positions outside the map resolve to `None` and are ignored by callers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Viewport {
    /// Fit a centred square box into a canvas of the given pixel size,
    /// keeping a small margin on the shorter axis.
    pub fn fit(canvas_width: f64, canvas_height: f64) -> Self {
        let size = (canvas_width.min(canvas_height) - FIT_MARGIN).max(1.0);
        Self {
            x: (canvas_width - size) / 2.0,
            y: (canvas_height - size) / 2.0,
            size,
        }
    }

    /// Pixel side length of one cell for a map `map_width` cells wide.
    #[inline]
    pub fn cell_size(&self, map_width: i32) -> f64 {
        self.size / map_width as f64
    }

    /// Resolve a canvas pixel position to a cell coordinate, or `None` if
    /// the position falls outside the `map_width × map_height` grid.
    pub fn cell_at(&self, px: f64, py: f64, map_width: i32, map_height: i32) -> Option<Point> {
        let x = ((px - self.x) / (self.size / map_width as f64)).floor() as i32;
        let y = ((py - self.y) / (self.size / map_height as f64)).floor() as i32;
        if x >= 0 && x < map_width && y >= 0 && y < map_height {
            Some(Point::new(x, y))
        } else {
            None
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            size: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_ops() {
        let p = Point::new(2, 3);
        assert_eq!(p.shift(1, -1), Point::new(3, 2));
        assert_eq!(p + Point::new(1, 1), Point::new(3, 4));
        assert_eq!(p - Point::new(2, 3), Point::ZERO);
    }

    #[test]
    fn viewport_fit_centres_box() {
        let v = Viewport::fit(200.0, 100.0);
        assert_eq!(v.size, 90.0);
        assert_eq!(v.x, 55.0);
        assert_eq!(v.y, 5.0);
    }

    #[test]
    fn viewport_cell_at_inside() {
        // 90-pixel box at (5, 5), 9x9 map: cells are 10px wide.
        let v = Viewport {
            x: 5.0,
            y: 5.0,
            size: 90.0,
        };
        assert_eq!(v.cell_at(5.0, 5.0, 9, 9), Some(Point::ZERO));
        assert_eq!(v.cell_at(14.9, 5.0, 9, 9), Some(Point::ZERO));
        assert_eq!(v.cell_at(15.0, 25.0, 9, 9), Some(Point::new(1, 2)));
        assert_eq!(v.cell_at(94.9, 94.9, 9, 9), Some(Point::new(8, 8)));
    }

    #[test]
    fn viewport_cell_at_outside_is_none() {
        let v = Viewport {
            x: 5.0,
            y: 5.0,
            size: 90.0,
        };
        assert_eq!(v.cell_at(0.0, 50.0, 9, 9), None);
        assert_eq!(v.cell_at(95.0, 50.0, 9, 9), None);
        assert_eq!(v.cell_at(50.0, 200.0, 9, 9), None);
    }
}
