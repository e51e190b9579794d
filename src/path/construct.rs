//! Random loop construction
//!
//! A loop is grown as the boundary of a region of faces, where a face is the unit square
//! between four cell centres. The region only grows while its boundary remains one simple
//! cycle, so the result is always a valid loop.

use crate::collections::grid::{Coord, Direction, IsGrid, UnitGrid};
use crate::collections::Grid;
use crate::path::{is_single_cycle, Edge, SegmentSet};
use crate::random::PuzzleRng;

/// Chance of accepting a face that leaves a cell enclosed by the loop
const ENCLOSE_CHANCE: f64 = 0.05;

/// Builds a random closed loop through cell centres, growing it until it passes through at
/// least `max_cells` cells or cannot grow further. The grid must be at least 2x2.
pub(crate) fn random_loop(grid: UnitGrid, max_cells: usize, rng: &mut PuzzleRng) -> SegmentSet {
    assert!(grid.rows() >= 2 && grid.cols() >= 2);
    let mut faces: Grid<bool> = Grid::with_size(grid.rows() - 1, grid.cols() - 1);
    let first = faces.coord_at(rng.gen_index(faces.len()));
    faces[first] = true;
    let mut boundary = face_boundary(&faces, grid);
    while boundary.len() < max_cells {
        let mut frontier: Vec<Coord> = faces
            .coords()
            .filter(|&f| !faces[f] && touches_region(&faces, f))
            .collect();
        rng.shuffle(&mut frontier);
        let mut grown = false;
        for face in frontier {
            if encloses_cell(&faces, face, grid) && rng.next_f64() >= ENCLOSE_CHANCE {
                continue;
            }
            faces[face] = true;
            let candidate = face_boundary(&faces, grid);
            if is_single_cycle(&candidate, &grid) {
                boundary = candidate;
                grown = true;
                break;
            }
            faces[face] = false;
        }
        if !grown {
            break;
        }
    }
    trace!("Constructed loop of {} segments", boundary.len());
    boundary
}

fn touches_region(faces: &Grid<bool>, face: Coord) -> bool {
    Direction::ALL
        .iter()
        .filter_map(|&d| faces.neighbor(face, d))
        .any(|n| faces[n])
}

fn in_region(faces: &Grid<bool>, row: Option<usize>, col: Option<usize>) -> bool {
    match (row, col) {
        (Some(row), Some(col)) => faces.get(Coord::new(row, col)).copied().unwrap_or(false),
        _ => false,
    }
}

/// True if adding `face` would leave one of its corner cells surrounded by the region
fn encloses_cell(faces: &Grid<bool>, face: Coord, grid: UnitGrid) -> bool {
    let corners = [
        Coord::new(face.row(), face.col()),
        Coord::new(face.row(), face.col() + 1),
        Coord::new(face.row() + 1, face.col()),
        Coord::new(face.row() + 1, face.col() + 1),
    ];
    corners.iter().any(|&cell| {
        let (r, c) = (cell.row(), cell.col());
        if r == 0 || c == 0 || r + 1 == grid.rows() || c + 1 == grid.cols() {
            return false;
        }
        [(r - 1, c - 1), (r - 1, c), (r, c - 1), (r, c)]
            .iter()
            .all(|&(fr, fc)| {
                let f = Coord::new(fr, fc);
                f == face || faces[f]
            })
    })
}

/// Edges separating a face inside the region from one outside it
fn face_boundary(faces: &Grid<bool>, grid: UnitGrid) -> SegmentSet {
    let mut segments = SegmentSet::new();
    for cell in grid.coords() {
        let (r, c) = (cell.row(), cell.col());
        if let Some(east) = grid.neighbor(cell, Direction::East) {
            let above = in_region(faces, r.checked_sub(1), Some(c));
            let below = in_region(faces, Some(r), Some(c));
            if above != below {
                segments.insert(Edge::new(cell, east));
            }
        }
        if let Some(south) = grid.neighbor(cell, Direction::South) {
            let left = in_region(faces, Some(r), c.checked_sub(1));
            let right = in_region(faces, Some(r), Some(c));
            if left != right {
                segments.insert(Edge::new(cell, south));
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_grid() {
        let grid = UnitGrid::new(2, 2);
        let segments = random_loop(grid, 4, &mut PuzzleRng::from_seed(1));
        assert_eq!(4, segments.len());
        assert!(is_single_cycle(&segments, &grid));
    }

    #[test]
    fn always_a_single_cycle() {
        for seed in 0..20 {
            for &(rows, cols) in &[(3, 3), (5, 7), (8, 8)] {
                let grid = UnitGrid::new(rows, cols);
                let segments = random_loop(grid, rows * cols, &mut PuzzleRng::from_seed(seed));
                assert!(is_single_cycle(&segments, &grid), "seed {}", seed);
            }
        }
    }

    #[test]
    fn stops_near_target() {
        let grid = UnitGrid::new(8, 8);
        let segments = random_loop(grid, 20, &mut PuzzleRng::from_seed(3));
        assert!(is_single_cycle(&segments, &grid));
        // one face adds at most two cells to the loop
        assert!(segments.len() < 20 + 2);
        assert!(segments.len() < grid.len());
    }

    #[test]
    fn deterministic() {
        let grid = UnitGrid::new(6, 6);
        assert_eq!(
            random_loop(grid, 24, &mut PuzzleRng::from_seed(9)),
            random_loop(grid, 24, &mut PuzzleRng::from_seed(9))
        );
    }
}
