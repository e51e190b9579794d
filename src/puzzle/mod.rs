//! Yajilin puzzles

pub use self::clue::{parse_clue, Clue};
pub use self::encoding::{Difficulty, PuzzleRecord};
pub use self::generate::{fallback_puzzle, Generator, GeneratorConfig, MAX_SIZE};
pub use self::minimize::minimize_clues;

use std::fmt;
use std::fmt::Display;

use crate::collections::grid::{Coord, IsGrid};
use crate::collections::Grid;
use crate::error::InvalidPuzzle;
use crate::path::{cell_connections, check_solved, validate_loop, SegmentSet};
use crate::puzzle::rules::{has_adjacency_violation, satisfies_clues};

mod clue;
mod encoding;
mod generate;
mod minimize;
pub mod rules;

/// A sparse grid of clues. `None` cells are not clue cells.
pub type Clues = Grid<Option<Clue>>;

/// `true` cells are shaded
pub type Shading = Grid<bool>;

/// What a cell is given a set of clues and a shading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellRole {
    Clue(Clue),
    Shaded,
    /// A cell the loop must pass through
    Open,
}

impl CellRole {
    pub fn of(clues: &Clues, shading: &Shading, coord: Coord) -> Self {
        if let Some(clue) = clues[coord] {
            CellRole::Clue(clue)
        } else if shading[coord] {
            CellRole::Shaded
        } else {
            CellRole::Open
        }
    }

    pub fn is_open(self) -> bool {
        self == CellRole::Open
    }
}

/// A Yajilin puzzle with its solution
#[derive(Clone, Debug, PartialEq)]
pub struct Puzzle {
    clues: Clues,
    solution_shading: Shading,
    solution_path: SegmentSet,
}

impl Puzzle {
    /// Creates a puzzle, checking that the solution is consistent with the clues
    pub fn new(
        clues: Clues,
        solution_shading: Shading,
        solution_path: SegmentSet,
    ) -> Result<Self, InvalidPuzzle> {
        if !clues.has_same_size(&solution_shading) {
            return Err(InvalidPuzzle::new(format!(
                "clues are {}x{} but the solution is {}x{}",
                clues.rows(),
                clues.cols(),
                solution_shading.rows(),
                solution_shading.cols()
            )));
        }
        if has_adjacency_violation(&solution_shading) {
            return Err(InvalidPuzzle::new("solution has adjacent shaded cells"));
        }
        if !satisfies_clues(&clues, &solution_shading) {
            return Err(InvalidPuzzle::new("solution does not satisfy the clues"));
        }
        if let Err(e) = validate_loop(&solution_path, &solution_shading, &clues) {
            return Err(InvalidPuzzle::new(format!("solution path: {}", e)));
        }
        Ok(Self {
            clues,
            solution_shading,
            solution_path,
        })
    }

    /// Generates a puzzle with the default configuration
    pub fn generate(rows: usize, cols: usize, seed: u64) -> Result<Self, InvalidPuzzle> {
        Generator::default().generate(rows, cols, seed)
    }

    pub(crate) fn from_parts(
        clues: Clues,
        solution_shading: Shading,
        solution_path: SegmentSet,
    ) -> Self {
        debug_assert!(satisfies_clues(&clues, &solution_shading));
        debug_assert!(validate_loop(&solution_path, &solution_shading, &clues).is_ok());
        Self {
            clues,
            solution_shading,
            solution_path,
        }
    }

    pub fn clues(&self) -> &Clues {
        &self.clues
    }

    pub fn clue(&self, coord: Coord) -> Option<Clue> {
        self.clues.get(coord).copied().flatten()
    }

    pub fn clue_count(&self) -> usize {
        self.clues.iter().filter(|c| c.is_some()).count()
    }

    pub fn solution_shading(&self) -> &Shading {
        &self.solution_shading
    }

    pub fn solution_path(&self) -> &SegmentSet {
        &self.solution_path
    }

    /// The role of a cell in the solution
    pub fn solution_role(&self, coord: Coord) -> CellRole {
        CellRole::of(&self.clues, &self.solution_shading, coord)
    }

    pub fn is_solved_by(&self, shading: &Shading, segments: &SegmentSet) -> bool {
        check_solved(shading, segments, &self.solution_shading, &self.clues)
    }

    /// Displays the puzzle with its solution filled in
    pub fn display_solution(&self) -> SolutionDisplay<'_> {
        SolutionDisplay { puzzle: self }
    }
}

impl IsGrid for Puzzle {
    fn rows(&self) -> usize {
        self.clues.rows()
    }

    fn cols(&self) -> usize {
        self.clues.cols()
    }
}

/// Clues as tokens, other cells as `.`
impl Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.clues.row_slices() {
            for clue in row {
                match clue {
                    Some(clue) => write!(f, "{:>3}", clue.to_string())?,
                    None => write!(f, "{:>3}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub struct SolutionDisplay<'a> {
    puzzle: &'a Puzzle,
}

impl Display for SolutionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let puzzle = self.puzzle;
        for row in 0..puzzle.rows() {
            for col in 0..puzzle.cols() {
                let coord = Coord::new(row, col);
                let cell = match puzzle.solution_role(coord) {
                    CellRole::Clue(clue) => clue.to_string(),
                    CellRole::Shaded => "#".to_string(),
                    CellRole::Open => {
                        let connections = cell_connections(&puzzle.solution_path, coord, puzzle);
                        path_symbol(&connections.to_string()).to_string()
                    }
                };
                write!(f, "{:>3}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn path_symbol(connections: &str) -> char {
    match connections {
        "ns" => '│',
        "ew" => '─',
        "ne" => '└',
        "nw" => '┘',
        "se" => '┌',
        "sw" => '┐',
        _ => '?',
    }
}
