//! A player's progress on one puzzle

use crate::collections::grid::{Coord, IsGrid};
use crate::collections::Grid;
use crate::path::{validate_loop, Edge, LoopError, SegmentSet};
use crate::puzzle::rules::{clue_satisfied, has_adjacent_shaded};
use crate::puzzle::{Puzzle, Shading};

/// Per-cell checks of the displayed board
#[derive(Clone, Debug, PartialEq)]
pub struct BoardStatus {
    /// Whether each clue is satisfied, `None` for cells without a clue
    pub clues: Grid<Option<bool>>,
    /// Shaded cells with a shaded neighbor
    pub adjacency: Grid<bool>,
    /// Why the drawn path is not a finished loop
    pub loop_error: Option<LoopError>,
    pub solved: bool,
}

/// Player shading and loop segments for a puzzle. Player actions that break a rule of the board
/// are rejected rather than reported as errors.
pub struct Session<'a> {
    puzzle: &'a Puzzle,
    shading: Shading,
    segments: SegmentSet,
    revealed: bool,
}

impl<'a> Session<'a> {
    pub fn new(puzzle: &'a Puzzle) -> Self {
        Self {
            puzzle,
            shading: Grid::with_size(puzzle.rows(), puzzle.cols()),
            segments: SegmentSet::new(),
            revealed: false,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        self.puzzle
    }

    pub fn shading(&self) -> &Shading {
        &self.shading
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Shades or unshades a cell. Shading a cell removes every segment touching it.
    pub fn toggle_shade(&mut self, coord: Coord) -> bool {
        if self.revealed || !self.puzzle.contains(coord) || self.puzzle.clue(coord).is_some() {
            return false;
        }
        let shaded = !self.shading[coord];
        self.shading[coord] = shaded;
        if shaded {
            self.segments.remove_touching(coord);
        }
        trace!("Cell {} shaded: {}", coord, shaded);
        true
    }

    /// Adds or removes the segment between two adjacent cells
    pub fn toggle_segment(&mut self, a: Coord, b: Coord) -> bool {
        if self.revealed || !self.can_hold_segment(a) || !self.can_hold_segment(b) {
            return false;
        }
        match Edge::between(a, b) {
            Some(edge) => {
                let present = self.segments.toggle(edge);
                trace!("Segment {:?} present: {}", edge, present);
                true
            }
            None => false,
        }
    }

    fn can_hold_segment(&self, coord: Coord) -> bool {
        self.puzzle.contains(coord) && self.puzzle.clue(coord).is_none() && !self.shading[coord]
    }

    /// Clears all player input and hides the solution
    pub fn reset(&mut self) {
        self.shading = Grid::with_size(self.puzzle.rows(), self.puzzle.cols());
        self.segments.clear();
        self.revealed = false;
    }

    pub fn reveal_solution(&mut self) {
        self.revealed = true;
    }

    /// The shading and segments shown to the player: the solution once revealed, otherwise the
    /// player's own input
    pub fn displayed(&self) -> (&Shading, &SegmentSet) {
        if self.revealed {
            (
                self.puzzle.solution_shading(),
                self.puzzle.solution_path(),
            )
        } else {
            (&self.shading, &self.segments)
        }
    }

    /// Whether the clue at `coord` is satisfied by the displayed shading, `None` if there is no
    /// clue
    pub fn clue_status(&self, coord: Coord) -> Option<bool> {
        let clue = self.puzzle.clue(coord)?;
        let (shading, _) = self.displayed();
        Some(clue_satisfied(shading, coord, clue))
    }

    pub fn adjacency_violation(&self, coord: Coord) -> bool {
        let (shading, _) = self.displayed();
        shading.contains(coord) && has_adjacent_shaded(shading, coord)
    }

    /// True if the displayed shading matches the solution and the displayed segments form a
    /// valid loop
    pub fn is_solved(&self) -> bool {
        let (shading, segments) = self.displayed();
        self.puzzle.is_solved_by(shading, segments)
    }

    pub fn status(&self) -> BoardStatus {
        let (shading, segments) = self.displayed();
        let clues = Grid::from_fn(self.puzzle.rows(), self.puzzle.cols(), |coord| {
            self.clue_status(coord)
        });
        let adjacency = Grid::from_fn(self.puzzle.rows(), self.puzzle.cols(), |coord| {
            has_adjacent_shaded(shading, coord)
        });
        let loop_error = validate_loop(segments, shading, self.puzzle.clues()).err();
        BoardStatus {
            clues,
            adjacency,
            loop_error,
            solved: self.is_solved(),
        }
    }
}
