use thiserror::Error;

use crate::collections::grid::{Coord, IsGrid};
use crate::path::{cell_connections, walk_loop, SegmentSet, Walk};
use crate::puzzle::{Clues, Shading};

/// The reason a drawn path is not a finished loop
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopError {
    #[error("no path has been drawn")]
    NoPath,
    #[error("a cell on the loop does not have exactly two connections")]
    Incomplete,
    #[error("the path touches a shaded cell or a clue cell")]
    InvalidCell,
    #[error("the path does not visit every open cell")]
    MissingCells,
    #[error("the loop closes before visiting every open cell")]
    PartialLoop,
    #[error("the path forms more than one loop")]
    MultipleLoops,
    #[error("the path ends without closing")]
    DeadEnd,
}

impl LoopError {
    /// Short machine readable code
    pub fn reason(self) -> &'static str {
        match self {
            LoopError::NoPath => "no-path",
            LoopError::Incomplete => "incomplete",
            LoopError::InvalidCell => "invalid-cell",
            LoopError::MissingCells => "missing-cells",
            LoopError::PartialLoop => "partial-loop",
            LoopError::MultipleLoops => "multiple-loops",
            LoopError::DeadEnd => "dead-end",
        }
    }
}

/// Checks that `segments` form exactly one closed loop passing through every cell that is
/// neither shaded nor a clue, and through no other cell.
///
/// A shading and clues of different sizes fail with `LoopError::InvalidCell`.
pub fn validate_loop(
    segments: &SegmentSet,
    shading: &Shading,
    clues: &Clues,
) -> Result<(), LoopError> {
    if !shading.has_same_size(clues) {
        return Err(LoopError::InvalidCell);
    }
    if segments.is_empty() {
        return Err(LoopError::NoPath);
    }
    let is_required = |coord: Coord| !shading[coord] && clues[coord].is_none();
    let required: Vec<_> = shading.coords().filter(|&c| is_required(c)).collect();

    if required
        .iter()
        .any(|&c| cell_connections(segments, c, shading).len() != 2)
    {
        return Err(LoopError::Incomplete);
    }
    let touched = segments.touched_cells();
    if touched
        .iter()
        .any(|&c| !shading.contains(c) || !is_required(c))
    {
        return Err(LoopError::InvalidCell);
    }
    if required.iter().any(|c| !touched.contains(c)) {
        return Err(LoopError::MissingCells);
    }

    let start = match required.first() {
        Some(&start) => start,
        None => return Err(LoopError::InvalidCell),
    };
    match walk_loop(segments, start, shading) {
        Walk::Closed(visited) if visited == required.len() => Ok(()),
        Walk::Closed(_) => Err(LoopError::PartialLoop),
        Walk::Revisited => Err(LoopError::MultipleLoops),
        Walk::DeadEnd => Err(LoopError::DeadEnd),
    }
}

/// True if the shading matches the solution exactly and the segments form a valid loop.
///
/// The segments are not compared with the solution path. Any valid loop is accepted.
pub fn check_solved(
    shading: &Shading,
    segments: &SegmentSet,
    solution_shading: &Shading,
    clues: &Clues,
) -> bool {
    shading == solution_shading && validate_loop(segments, shading, clues).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::grid::Direction;
    use crate::collections::Grid;
    use crate::path::Edge;
    use crate::puzzle::Clue;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    fn empty(rows: usize, cols: usize) -> (Shading, Clues) {
        (Grid::with_size(rows, cols), Grid::with_size(rows, cols))
    }

    fn ring_2x2() -> SegmentSet {
        SegmentSet::from_cycle(&[c(0, 0), c(0, 1), c(1, 1), c(1, 0)])
    }

    #[test]
    fn ring_is_valid() {
        let (shading, clues) = empty(2, 2);
        assert_eq!(Ok(()), validate_loop(&ring_2x2(), &shading, &clues));
    }

    #[test]
    fn mismatched_sizes() {
        let shading: Shading = Grid::with_size(2, 2);
        let clues: Clues = Grid::with_size(3, 2);
        assert_eq!(
            Err(LoopError::InvalidCell),
            validate_loop(&ring_2x2(), &shading, &clues)
        );
        assert!(!check_solved(&shading, &ring_2x2(), &shading, &clues));
    }

    #[test]
    fn missing_edge() {
        let (shading, clues) = empty(2, 2);
        let mut segments = ring_2x2();
        segments.remove(Edge::new(c(1, 0), c(1, 1)));
        assert_eq!(
            Err(LoopError::Incomplete),
            validate_loop(&segments, &shading, &clues)
        );
    }

    #[test]
    fn no_path() {
        let (shading, clues) = empty(2, 2);
        let result = validate_loop(&SegmentSet::new(), &shading, &clues);
        assert_eq!(Err(LoopError::NoPath), result);
        assert_eq!("no-path", result.unwrap_err().reason());
    }

    #[test]
    fn l_tromino_cannot_close() {
        let (mut shading, clues) = empty(2, 2);
        shading[c(1, 1)] = true;
        let segments: SegmentSet = vec![
            Edge::new(c(1, 0), c(0, 0)),
            Edge::new(c(0, 0), c(0, 1)),
            Edge::new(c(0, 1), c(1, 1)),
        ]
        .into_iter()
        .collect();
        assert!(validate_loop(&segments, &shading, &clues).is_err());
        let open: SegmentSet = vec![Edge::new(c(1, 0), c(0, 0)), Edge::new(c(0, 0), c(0, 1))]
            .into_iter()
            .collect();
        assert_eq!(
            Err(LoopError::Incomplete),
            validate_loop(&open, &shading, &clues)
        );
    }

    #[test]
    fn path_through_clue_cell() {
        let (shading, mut clues) = empty(2, 3);
        clues[c(0, 2)] = Some(Clue::new(Direction::South, 0));
        clues[c(1, 2)] = Some(Clue::new(Direction::North, 0));
        let mut segments = ring_2x2();
        segments.insert(Edge::new(c(0, 2), c(1, 2)));
        assert_eq!(
            Err(LoopError::InvalidCell),
            validate_loop(&segments, &shading, &clues)
        );
    }

    #[test]
    fn two_loops() {
        let (shading, clues) = empty(2, 4);
        let mut segments = ring_2x2();
        for edge in &SegmentSet::from_cycle(&[c(0, 2), c(0, 3), c(1, 3), c(1, 2)]) {
            segments.insert(*edge);
        }
        let result = validate_loop(&segments, &shading, &clues);
        assert_eq!(Err(LoopError::PartialLoop), result);
    }

    #[test]
    fn single_big_loop() {
        let (shading, clues) = empty(2, 4);
        let segments = SegmentSet::from_cycle(&[
            c(0, 0),
            c(0, 1),
            c(0, 2),
            c(0, 3),
            c(1, 3),
            c(1, 2),
            c(1, 1),
            c(1, 0),
        ]);
        assert_eq!(Ok(()), validate_loop(&segments, &shading, &clues));
    }

    #[test]
    fn solved_independent_of_path_identity() {
        let (shading, clues) = empty(4, 4);
        let ring = SegmentSet::from_cycle(&[
            c(0, 0),
            c(0, 1),
            c(0, 2),
            c(0, 3),
            c(1, 3),
            c(2, 3),
            c(3, 3),
            c(3, 2),
            c(3, 1),
            c(3, 0),
            c(2, 0),
            c(1, 0),
        ]);
        let snake = SegmentSet::from_cycle(&[
            c(0, 0),
            c(0, 1),
            c(0, 2),
            c(0, 3),
            c(1, 3),
            c(2, 3),
            c(3, 3),
            c(3, 2),
            c(3, 1),
            c(3, 0),
            c(2, 0),
            c(2, 1),
            c(2, 2),
            c(1, 2),
            c(1, 1),
            c(1, 0),
        ]);
        // the ring leaves the middle uncovered
        assert!(!check_solved(&shading, &ring, &shading, &clues));
        assert!(check_solved(&shading, &snake, &shading, &clues));

        let columns = SegmentSet::from_cycle(&[
            c(0, 0),
            c(0, 1),
            c(1, 1),
            c(2, 1),
            c(2, 2),
            c(1, 2),
            c(0, 2),
            c(0, 3),
            c(1, 3),
            c(2, 3),
            c(3, 3),
            c(3, 2),
            c(3, 1),
            c(3, 0),
            c(2, 0),
            c(1, 0),
        ]);
        assert_ne!(snake, columns);
        assert!(check_solved(&shading, &columns, &shading, &clues));
    }

    #[test]
    fn solved_requires_matching_shading() {
        let (shading, clues) = empty(2, 2);
        let mut solution = shading.clone();
        solution[c(0, 0)] = true;
        assert!(!check_solved(&shading, &ring_2x2(), &solution, &clues));
    }
}
