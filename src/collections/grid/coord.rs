use std::fmt;
use std::fmt::{Debug, Display};

use crate::collections::grid::Direction;

/// A `Coord` struct represents the row and column of a cell in a `Grid`.
///
/// Coordinates are ordered row-major.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord([usize; 2]);

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self([row, col])
    }

    pub fn row(self) -> usize {
        self.0[0]
    }

    pub fn col(self) -> usize {
        self.0[1]
    }

    /// Returns the direction from this coordinate to an orthogonally adjacent coordinate
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        let (r1, c1, r2, c2) = (self.row(), self.col(), other.row(), other.col());
        if c1 == c2 {
            if r2 + 1 == r1 {
                return Some(Direction::North);
            }
            if r1 + 1 == r2 {
                return Some(Direction::South);
            }
        } else if r1 == r2 {
            if c1 + 1 == c2 {
                return Some(Direction::East);
            }
            if c2 + 1 == c1 {
                return Some(Direction::West);
            }
        }
        None
    }

    pub fn is_adjacent(self, other: Coord) -> bool {
        self.direction_to(other).is_some()
    }
}

impl Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl From<[usize; 2]> for Coord {
    fn from(array: [usize; 2]) -> Self {
        Self(array)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
