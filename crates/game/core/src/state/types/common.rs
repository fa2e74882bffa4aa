use std::fmt;
use std::ops::Add;

use crate::action::CardinalDirection;

/// Discrete grid position expressed in tile coordinates.
///
/// Row `0` is the bottom of the map; `y` grows northward.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell one step away in `direction`.
    pub fn step(self, direction: CardinalDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add<CardinalDirection> for Position {
    type Output = Position;

    fn add(self, rhs: CardinalDirection) -> Position {
        self.step(rhs)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous screen-space position in pixels, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PixelPosition {
    pub px: f32,
    pub py: f32,
}

impl PixelPosition {
    pub const fn new(px: f32, py: f32) -> Self {
        Self { px, py }
    }

    /// Top-left pixel of `cell` on a map `rows` tall.
    ///
    /// The vertical axis is flipped because grid row 0 is drawn at the bottom.
    pub fn of_cell(cell: Position, rows: u32, tile_size: f32) -> Self {
        let flipped = rows as i32 - 1 - cell.y;
        Self {
            px: cell.x as f32 * tile_size,
            py: flipped as f32 * tile_size,
        }
    }
}

impl fmt::Display for PixelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.px, self.py)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_moves_exactly_one_axis() {
        let origin = Position::new(4, 4);
        for direction in CardinalDirection::ALL {
            let next = origin + direction;
            let moved_x = next.x != origin.x;
            let moved_y = next.y != origin.y;
            assert!(moved_x ^ moved_y, "{direction} must change exactly one axis");
        }
    }

    #[test]
    fn pixel_target_flips_rows() {
        // Row 0 sits at the bottom of a 7-row map
        assert_eq!(
            PixelPosition::of_cell(Position::new(0, 0), 7, 50.0),
            PixelPosition::new(0.0, 300.0)
        );
        assert_eq!(
            PixelPosition::of_cell(Position::new(1, 2), 7, 50.0),
            PixelPosition::new(50.0, 200.0)
        );
        assert_eq!(
            PixelPosition::of_cell(Position::new(15, 6), 7, 50.0),
            PixelPosition::new(750.0, 0.0)
        );
    }
}
