//! The four orthogonal directions of a `Grid`

use std::fmt;
use std::fmt::{Debug, Display};

use self::Direction::{East, North, South, West};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Every direction, in the order used for encoding connections
    pub const ALL: [Direction; 4] = [North, South, East, West];

    pub fn letter(self) -> char {
        match self {
            North => 'n',
            South => 's',
            East => 'e',
            West => 'w',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'n' => Some(North),
            's' => Some(South),
            'e' => Some(East),
            'w' => Some(West),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            North => South,
            South => North,
            East => West,
            West => East,
        }
    }

    /// Position of the direction in `Direction::ALL`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            North => "North",
            South => "South",
            East => "East",
            West => "West",
        };
        f.write_str(label)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn letters() {
        for &d in &Direction::ALL {
            assert_eq!(Some(d), Direction::from_letter(d.letter()));
        }
        assert_eq!(None, Direction::from_letter('x'));
    }

    #[test]
    fn opposite() {
        for &d in &Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }
}
