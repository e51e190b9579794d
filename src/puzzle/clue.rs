use std::fmt;
use std::fmt::Display;

use crate::collections::grid::Direction;

/// A directional count clue. The number of shaded cells beyond the clue cell in `direction`,
/// up to the edge of the grid, must equal `count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Clue {
    pub direction: Direction,
    pub count: u32,
}

impl Clue {
    pub fn new(direction: Direction, count: u32) -> Self {
        Self { direction, count }
    }
}

/// Writes the dataset token, e.g. `2e`
impl Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.direction.letter())
    }
}

/// Parses a clue token of the form `<count><direction>`. Anything malformed is no clue.
pub fn parse_clue(s: &str) -> Option<Clue> {
    let s = s.trim();
    let direction_char = s.chars().last()?;
    let direction = Direction::from_letter(direction_char.to_ascii_lowercase())?;
    let digits = &s[..s.len() - direction_char.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = digits.parse().ok()?;
    Some(Clue { direction, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        for &direction in &Direction::ALL {
            for &count in &[0, 1, 3, 12] {
                let clue = Clue::new(direction, count);
                let token = clue.to_string();
                assert_eq!(Some(clue), parse_clue(&token), "{}", token);
            }
        }
    }

    #[test]
    fn tokens() {
        assert_eq!(Some(Clue::new(Direction::West, 1)), parse_clue("1w"));
        assert_eq!(Some(Clue::new(Direction::North, 0)), parse_clue("0n"));
        assert_eq!(Some(Clue::new(Direction::East, 3)), parse_clue("3e"));
        assert_eq!("2s", Clue::new(Direction::South, 2).to_string());
    }

    #[test]
    fn malformed() {
        for s in &["", "abc", "1x", "n", "-1n", "1 n", "99999999999n", "1né"] {
            assert_eq!(None, parse_clue(s), "{:?}", s);
        }
    }
}
