use crate::collections::grid::{Coord, Direction, IsGrid};
use crate::collections::Grid;
use crate::path::SegmentSet;
use crate::puzzle::{Clues, Shading};

/// One cell of the partial loop and the next direction to try from it
struct Step {
    cell: Coord,
    next_direction: usize,
}

/// How a loop search ended
#[derive(Debug, PartialEq)]
pub(crate) enum LoopSearch {
    Found(SegmentSet),
    /// No loop can pass through the required cells
    Impossible,
    LimitReached,
}

/// Searches for a closed loop passing through every cell that is neither shaded nor a clue.
///
/// Returns `None` if no loop exists or if the search exceeds `iteration_limit` steps.
pub fn derive_loop(clues: &Clues, shading: &Shading, iteration_limit: u64) -> Option<SegmentSet> {
    match search_loop(clues, shading, iteration_limit) {
        LoopSearch::Found(segments) => Some(segments),
        LoopSearch::Impossible | LoopSearch::LimitReached => None,
    }
}

pub(crate) fn search_loop(clues: &Clues, shading: &Shading, iteration_limit: u64) -> LoopSearch {
    if !shading.has_same_size(clues) {
        return LoopSearch::Impossible;
    }
    let required = Grid::from_fn(shading.rows(), shading.cols(), |c| {
        !shading[c] && clues[c].is_none()
    });
    let cells: Vec<Coord> = required.coords().filter(|&c| required[c]).collect();
    if cells.len() < 4 {
        return LoopSearch::Impossible;
    }
    let open_neighbors = |coord: Coord| -> Vec<Coord> {
        Direction::ALL
            .iter()
            .filter_map(|&d| required.neighbor(coord, d))
            .filter(|&n| required[n])
            .collect()
    };
    if cells.iter().any(|&c| open_neighbors(c).len() < 2) {
        return LoopSearch::Impossible;
    }
    // a cycle on a grid alternates between the two colors of a checkerboard
    let even = cells.iter().filter(|c| (c.row() + c.col()) % 2 == 0).count();
    if even * 2 != cells.len() {
        return LoopSearch::Impossible;
    }
    let mut reached: Grid<bool> = Grid::with_size(shading.rows(), shading.cols());
    reached[cells[0]] = true;
    let mut queue = vec![cells[0]];
    let mut reached_count = 1;
    while let Some(cell) = queue.pop() {
        for n in open_neighbors(cell) {
            if !reached[n] {
                reached[n] = true;
                reached_count += 1;
                queue.push(n);
            }
        }
    }
    if reached_count != cells.len() {
        return LoopSearch::Impossible;
    }

    let start = cells[0];
    let mut visited: Grid<bool> = Grid::with_size(shading.rows(), shading.cols());
    visited[start] = true;
    let mut stack = vec![Step {
        cell: start,
        next_direction: 0,
    }];
    let mut iterations = 0;
    loop {
        iterations += 1;
        if iterations > iteration_limit {
            debug!("Loop search reached the iteration limit");
            return LoopSearch::LimitReached;
        }
        let depth = stack.len();
        let step = match stack.last_mut() {
            Some(step) => step,
            None => return LoopSearch::Impossible,
        };
        let current = step.cell;
        if depth == cells.len() {
            if current.is_adjacent(start) {
                let path: Vec<Coord> = stack.iter().map(|s| s.cell).collect();
                trace!("Found loop after {} iterations", iterations);
                return LoopSearch::Found(SegmentSet::from_cycle(&path));
            }
            visited[current] = false;
            stack.pop();
            continue;
        }
        // the loop has to be able to return to the start
        let start_reachable = depth < 2
            || Direction::ALL
                .iter()
                .filter_map(|&d| required.neighbor(start, d))
                .any(|n| required[n] && !visited[n]);
        let mut advance = None;
        while start_reachable && step.next_direction < Direction::ALL.len() {
            let direction = Direction::ALL[step.next_direction];
            step.next_direction += 1;
            if let Some(n) = required.neighbor(current, direction) {
                if required[n] && !visited[n] {
                    advance = Some(n);
                    break;
                }
            }
        }
        match advance {
            Some(next) => {
                visited[next] = true;
                stack.push(Step {
                    cell: next,
                    next_direction: 0,
                });
            }
            None => {
                visited[current] = false;
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::validate_loop;
    use crate::puzzle::Clue;

    #[test]
    fn open_grid() {
        let shading: Shading = Grid::with_size(4, 4);
        let clues: Clues = Grid::with_size(4, 4);
        let segments = derive_loop(&clues, &shading, 100_000).unwrap();
        assert_eq!(16, segments.len());
        assert_eq!(Ok(()), validate_loop(&segments, &shading, &clues));
    }

    #[test]
    fn around_clue_and_shading() {
        let mut shading: Shading = Grid::with_size(3, 4);
        let mut clues: Clues = Grid::with_size(3, 4);
        shading[Coord::new(1, 1)] = true;
        clues[Coord::new(1, 2)] = Some(Clue::new(Direction::West, 1));
        let segments = derive_loop(&clues, &shading, 100_000).unwrap();
        assert_eq!(Ok(()), validate_loop(&segments, &shading, &clues));
    }

    #[test]
    fn odd_cell_count() {
        let shading: Shading = Grid::with_size(3, 3);
        let clues: Clues = Grid::with_size(3, 3);
        assert_eq!(None, derive_loop(&clues, &shading, 100_000));
    }

    #[test]
    fn dead_end_cell() {
        let mut shading: Shading = Grid::with_size(2, 3);
        let clues: Clues = Grid::with_size(2, 3);
        shading[Coord::new(1, 1)] = true;
        assert_eq!(None, derive_loop(&clues, &shading, 100_000));
    }

    #[test]
    fn split_regions() {
        // two 2x2 rings separated by a column of clues
        let shading: Shading = Grid::with_size(2, 5);
        let mut clues: Clues = Grid::with_size(2, 5);
        clues[Coord::new(0, 2)] = Some(Clue::new(Direction::West, 0));
        clues[Coord::new(1, 2)] = Some(Clue::new(Direction::East, 0));
        assert_eq!(
            LoopSearch::Impossible,
            search_loop(&clues, &shading, 100_000)
        );
    }

    #[test]
    fn limit_is_not_impossible() {
        let shading: Shading = Grid::with_size(4, 4);
        let clues: Clues = Grid::with_size(4, 4);
        assert_eq!(LoopSearch::LimitReached, search_loop(&clues, &shading, 3));
        assert!(matches!(
            search_loop(&clues, &shading, 100_000),
            LoopSearch::Found(_)
        ));
    }
}
