//! Brush footprints and per-brush option records.

use std::collections::BTreeMap;

use crate::geom::Point;
use crate::palette::Material;

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// Enumerate the cells affected by a brush of the given size centred at
/// `center`, clipped to a `width × height` grid.
///
/// Size 1 is exactly the centre cell. Larger sizes cover a square with
/// half-extent `r = max(1, size / 2)`; even sizes sit asymmetrically, one
/// cell further right and down than left and up. Cells are enumerated with
/// x as the outer ascending loop and y as the inner one, and out-of-bounds
/// candidates are silently dropped.
pub fn footprint(center: Point, size: i32, width: i32, height: i32) -> Vec<Point> {
    if size == 1 {
        return vec![center];
    }

    let r = (size / 2).max(1);
    let (x0, y0) = if size % 2 == 0 {
        (center.x - r + 1, center.y - r + 1)
    } else {
        (center.x - r, center.y - r)
    };

    let mut cells = Vec::new();
    for i in x0..=center.x + r {
        for j in y0..=center.y + r {
            if i >= 0 && i < width && j >= 0 && j < height {
                cells.push(Point::new(i, j));
            }
        }
    }
    cells
}

// ---------------------------------------------------------------------------
// BrushOptions
// ---------------------------------------------------------------------------

/// A single configurable brush option value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// A numeric option (e.g. the brush width).
    Number(i32),
    /// A material choice (brush 0's Color option).
    Choice(Material),
}

/// The configurable options of one brush, keyed by option name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrushOptions {
    values: BTreeMap<String, OptionValue>,
}

impl BrushOptions {
    /// Option name for the numeric brush width.
    pub const WIDTH: &'static str = "Brush Width";
    /// Option name for brush 0's material choice.
    pub const COLOR: &'static str = "Color";

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Set or replace an option value.
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    /// The brush width. Missing or non-positive values coerce to 1.
    pub fn width(&self) -> i32 {
        match self.values.get(Self::WIDTH) {
            Some(OptionValue::Number(n)) if *n >= 1 => *n,
            _ => 1,
        }
    }

    /// The selected material, for brushes that carry a Color option.
    pub fn color(&self) -> Option<Material> {
        match self.values.get(Self::COLOR) {
            Some(OptionValue::Choice(m)) => Some(*m),
            _ => None,
        }
    }
}

/// The toolbar's brush set: brush 0 (colour-selectable) and brush 1
/// (dirt), each starting at width 1.
pub fn default_brushes() -> Vec<BrushOptions> {
    let mut color_brush = BrushOptions::default();
    color_brush.set(BrushOptions::WIDTH, OptionValue::Number(1));
    color_brush.set(
        BrushOptions::COLOR,
        OptionValue::Choice(Material::AntHell),
    );

    let mut dirt_brush = BrushOptions::default();
    dirt_brush.set(BrushOptions::WIDTH, OptionValue::Number(1));

    vec![color_brush, dirt_brush]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(cells: &[Point]) -> Vec<(i32, i32)> {
        cells.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn footprint_size_one_is_centre() {
        assert_eq!(footprint(Point::new(3, 4), 1, 10, 10), vec![Point::new(3, 4)]);
    }

    #[test]
    fn footprint_odd_size() {
        // Size 3 at (2,2) on 5x5: the 9 cells (1,1)..(3,3), x-major.
        let cells = footprint(Point::new(2, 2), 3, 5, 5);
        assert_eq!(
            coords(&cells),
            vec![
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 1),
                (3, 2),
                (3, 3),
            ]
        );
    }

    #[test]
    fn footprint_even_size_clips_at_corner() {
        // Size 2 at the origin on 5x5: r = 1, i,j in [0, 1].
        let cells = footprint(Point::new(0, 0), 2, 5, 5);
        assert_eq!(coords(&cells), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn footprint_always_in_bounds() {
        for size in 1..=6 {
            for &(x, y) in &[(0, 0), (4, 4), (2, 0), (0, 3)] {
                for p in footprint(Point::new(x, y), size, 5, 5) {
                    assert!(p.x >= 0 && p.x < 5 && p.y >= 0 && p.y < 5);
                }
            }
        }
    }

    #[test]
    fn footprint_grows_with_size() {
        let mut prev = 0;
        for size in 1..=8 {
            let n = footprint(Point::new(4, 4), size, 9, 9).len();
            assert!(n >= prev, "size {size} shrank the footprint");
            prev = n;
        }
    }

    #[test]
    fn default_brush_set() {
        let brushes = default_brushes();
        assert_eq!(brushes.len(), 2);
        assert_eq!(brushes[0].width(), 1);
        assert_eq!(brushes[0].color(), Some(Material::AntHell));
        assert_eq!(brushes[1].color(), None);
    }

    #[test]
    fn width_coercion() {
        let mut opts = BrushOptions::default();
        assert_eq!(opts.width(), 1);
        opts.set(BrushOptions::WIDTH, OptionValue::Number(0));
        assert_eq!(opts.width(), 1);
        opts.set(BrushOptions::WIDTH, OptionValue::Number(4));
        assert_eq!(opts.width(), 4);
    }
}
