//! Puzzle records as stored in dataset files
//!
//! Clue cells hold a token such as `2e`. Solution cells hold `"x"` for a shaded cell, a pair of
//! compass letters such as `"ne"` for a cell on the loop, or `null`.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collections::grid::{Coord, IsGrid};
use crate::collections::Grid;
use crate::error::{InvalidPuzzle, ParseDifficultyError};
use crate::path::{cell_connections, Connections, Edge, SegmentSet};
use crate::puzzle::{parse_clue, CellRole, Clues, Puzzle, Shading};

const SHADED_TOKEN: &str = "x";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// One puzzle of a dataset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: String,
    pub difficulty: Difficulty,
    pub clues: Vec<Vec<Option<String>>>,
    pub solution: Vec<Vec<Option<String>>>,
}

impl PuzzleRecord {
    pub fn rows(&self) -> usize {
        self.clues.len()
    }

    pub fn cols(&self) -> usize {
        self.clues.first().map_or(0, Vec::len)
    }

    /// Decodes the record, checking that its grids agree and that its loop segments are
    /// reciprocal and inside the grid
    pub fn to_puzzle(&self) -> Result<Puzzle, InvalidPuzzle> {
        let clue_tokens = Grid::try_from(self.clues.clone())
            .map_err(|e| InvalidPuzzle::new(format!("clues: {:?}", e)))?;
        let solution_tokens = Grid::try_from(self.solution.clone())
            .map_err(|e| InvalidPuzzle::new(format!("solution: {:?}", e)))?;
        if clue_tokens.is_empty() {
            return Err(InvalidPuzzle::new("puzzle has no cells"));
        }
        if !clue_tokens.has_same_size(&solution_tokens) {
            return Err(InvalidPuzzle::new(format!(
                "clues are {}x{} but the solution is {}x{}",
                clue_tokens.rows(),
                clue_tokens.cols(),
                solution_tokens.rows(),
                solution_tokens.cols()
            )));
        }

        let clues: Clues = clue_tokens.map(|token| {
            let token = token.as_deref()?;
            let clue = parse_clue(token);
            if clue.is_none() {
                warn!("Ignoring malformed clue token {:?}", token);
            }
            clue
        });

        let mut shading: Shading = Grid::with_size(clues.rows(), clues.cols());
        let mut connections: Grid<Connections> = Grid::with_size(clues.rows(), clues.cols());
        for (coord, token) in solution_tokens.iter_coord() {
            match token.as_deref() {
                None => {}
                Some(SHADED_TOKEN) => shading[coord] = true,
                Some(letters) => {
                    connections[coord] = Connections::from_letters(letters).ok_or_else(|| {
                        InvalidPuzzle::new(format!(
                            "invalid solution token {:?} at {}",
                            letters, coord
                        ))
                    })?;
                }
            }
        }

        let path = decode_path(&connections)?;
        Puzzle::new(clues, shading, path)
    }
}

fn decode_path(connections: &Grid<Connections>) -> Result<SegmentSet, InvalidPuzzle> {
    let mut path = SegmentSet::new();
    for (coord, cell) in connections.iter_coord() {
        for direction in cell.iter() {
            let neighbor = connections.neighbor(coord, direction).ok_or_else(|| {
                InvalidPuzzle::new(format!("segment leaves the grid at {}", coord))
            })?;
            if !connections[neighbor].contains(direction.opposite()) {
                return Err(InvalidPuzzle::new(format!(
                    "segment from {} to {} is not reciprocated",
                    coord, neighbor
                )));
            }
            path.insert(Edge::new(coord, neighbor));
        }
    }
    Ok(path)
}

impl Puzzle {
    /// Encodes the puzzle as a dataset record
    pub fn to_record(&self, id: impl Into<String>, difficulty: Difficulty) -> PuzzleRecord {
        let cell_tokens = |f: &dyn Fn(Coord) -> Option<String>| -> Vec<Vec<Option<String>>> {
            (0..self.rows())
                .map(|row| (0..self.cols()).map(|col| f(Coord::new(row, col))).collect())
                .collect()
        };
        let clues = cell_tokens(&|coord| self.clue(coord).map(|clue| clue.to_string()));
        let solution = cell_tokens(&|coord| match self.solution_role(coord) {
            CellRole::Clue(_) => None,
            CellRole::Shaded => Some(SHADED_TOKEN.to_string()),
            CellRole::Open => {
                let connections = cell_connections(self.solution_path(), coord, self);
                if connections.is_empty() {
                    None
                } else {
                    Some(connections.to_string())
                }
            }
        });
        PuzzleRecord {
            id: id.into(),
            difficulty,
            clues,
            solution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::grid::Direction;
    use crate::puzzle::Clue;

    fn tokens(rows: &[&[Option<&str>]]) -> Vec<Vec<Option<String>>> {
        rows.iter()
            .map(|row| row.iter().map(|t| t.map(str::to_string)).collect())
            .collect()
    }

    fn record() -> PuzzleRecord {
        PuzzleRecord {
            id: "ring".to_string(),
            difficulty: Difficulty::Easy,
            clues: tokens(&[
                &[None, None, None],
                &[None, Some("0n"), None],
                &[None, None, None],
            ]),
            solution: tokens(&[
                &[Some("se"), Some("ew"), Some("sw")],
                &[Some("ns"), None, Some("sn")],
                &[Some("ne"), Some("we"), Some("nw")],
            ]),
        }
    }

    #[test]
    fn decode() {
        let puzzle = record().to_puzzle().unwrap();
        assert_eq!(3, puzzle.rows());
        assert_eq!(
            Some(Clue::new(Direction::North, 0)),
            puzzle.clue(Coord::new(1, 1))
        );
        assert_eq!(8, puzzle.solution_path().len());
        assert!(puzzle.solution_shading().iter().all(|&s| !s));
    }

    #[test]
    fn encode_is_canonical() {
        let puzzle = record().to_puzzle().unwrap();
        let encoded = puzzle.to_record("ring", Difficulty::Easy);
        assert_eq!(Some("ns".to_string()), encoded.solution[1][2]);
        assert_eq!(Some("ew".to_string()), encoded.solution[2][1]);
        assert_eq!(None, encoded.solution[1][1]);
        assert_eq!(puzzle, encoded.to_puzzle().unwrap());
    }

    #[test]
    fn unreciprocated_segment() {
        let mut record = record();
        record.solution[1][1] = Some("ns".to_string());
        assert!(record.to_puzzle().is_err());
    }

    #[test]
    fn segment_out_of_bounds() {
        let mut record = record();
        record.solution[0][1] = Some("nw".to_string());
        assert!(record.to_puzzle().is_err());
    }

    #[test]
    fn mismatched_dimensions() {
        let mut record = record();
        record.solution.pop();
        assert!(record.to_puzzle().is_err());
        let mut record = self::record();
        record.clues[2].pop();
        assert!(record.to_puzzle().is_err());
    }

    #[test]
    fn bad_solution_token() {
        let mut record = record();
        record.solution[0][0] = Some("q".to_string());
        assert!(record.to_puzzle().is_err());
    }

    #[test]
    fn difficulty_names() {
        assert_eq!(Ok(Difficulty::Hard), "hard".parse());
        assert_eq!(Ok(Difficulty::Medium), "Medium".parse());
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(
            "\"easy\"",
            serde_json::to_string(&Difficulty::Easy).unwrap()
        );
    }
}
