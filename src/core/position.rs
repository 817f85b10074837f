//! Grid Coordinates
//!
//! Integer cell positions and unit step vectors. Positions are signed so a
//! step off the board is representable and can be bounds-checked.

use std::fmt;
use std::ops::Add;
use serde::{Serialize, Deserialize};

/// A cell coordinate. `x` is the column, `y` the row; (0, 0) is top-left.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step along `vector`.
    #[inline]
    pub fn step(self, vector: Vector) -> Self {
        self + vector
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Vector> for Position {
    type Output = Position;

    #[inline]
    fn add(self, v: Vector) -> Position {
        Position::new(self.x + v.dx, self.y + v.dy)
    }
}

/// A unit step along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vector {
    /// Column delta (-1, 0 or 1)
    pub dx: i32,
    /// Row delta (-1, 0 or 1)
    pub dy: i32,
}

impl Vector {
    /// Toward row 0
    pub const UP: Self = Self { dx: 0, dy: -1 };
    /// Toward the last column
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };
    /// Toward the last row
    pub const DOWN: Self = Self { dx: 0, dy: 1 };
    /// Toward column 0
    pub const LEFT: Self = Self { dx: -1, dy: 0 };

    /// All four directions, in input order (up, right, down, left).
    pub const ALL: [Self; 4] = [Self::UP, Self::RIGHT, Self::DOWN, Self::LEFT];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let p = Position::new(1, 1);
        assert_eq!(p.step(Vector::UP), Position::new(1, 0));
        assert_eq!(p.step(Vector::RIGHT), Position::new(2, 1));
        assert_eq!(p.step(Vector::DOWN), Position::new(1, 2));
        assert_eq!(p.step(Vector::LEFT), Position::new(0, 1));
    }

    #[test]
    fn test_step_off_board_is_representable() {
        let p = Position::new(0, 0).step(Vector::LEFT);
        assert_eq!(p, Position::new(-1, 0));
    }
}
