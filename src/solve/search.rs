use std::iter;

use crate::collections::grid::{Coord, Direction, IsGrid};
use crate::collections::Grid;
use crate::path::{search_loop, LoopSearch};
use crate::puzzle::rules::satisfies_clues;
use crate::puzzle::{Clues, Shading};
use crate::solve::SearchOutcome;

/// The decision made for one undecided cell
#[derive(Clone, Copy)]
struct Frame {
    shaded: bool,
}

/// The cells a clue counts and how many of them must be shaded
struct ClueRay {
    count: usize,
    cells: Vec<Coord>,
}

/// Depth-first search over shadings using an explicit stack of decision frames.
///
/// Cells are decided in row-major order. Frame `i` holds the decision for `cells[i]`, so every
/// cell at or past `frames.len()` is undecided and unshaded.
///
/// With a loop limit, a shading only counts if its open cells can carry a single loop. Decided
/// open cells must keep two open neighbors, and each complete shading is checked with a loop
/// search bounded by the limit. A loop search that hits the limit counts as a loop.
pub(crate) struct SearchContext<'a> {
    clues: &'a Clues,
    loop_limit: Option<u64>,
    cells: Vec<Coord>,
    /// position of each cell in `cells`, `None` for clue cells
    order: Grid<Option<usize>>,
    rays: Vec<ClueRay>,
    /// indices into `rays` of every ray passing through a cell
    watchers: Grid<Vec<usize>>,
    shading: Shading,
    frames: Vec<Frame>,
}

impl<'a> SearchContext<'a> {
    pub fn new(clues: &'a Clues, loop_limit: Option<u64>) -> Self {
        let (rows, cols) = (clues.rows(), clues.cols());
        let cells: Vec<Coord> = clues.coords().filter(|&c| clues[c].is_none()).collect();
        let mut order = Grid::with_size(rows, cols);
        for (i, &cell) in cells.iter().enumerate() {
            order[cell] = Some(i);
        }
        let mut rays = Vec::new();
        let mut watchers: Grid<Vec<usize>> = Grid::with_size(rows, cols);
        for (coord, clue) in clues.iter_coord() {
            if let Some(clue) = clue {
                let cells: Vec<Coord> = clues
                    .ray(coord, clue.direction)
                    .into_iter()
                    .filter(|&c| clues[c].is_none())
                    .collect();
                for &cell in &cells {
                    watchers[cell].push(rays.len());
                }
                rays.push(ClueRay {
                    count: clue.count as usize,
                    cells,
                });
            }
        }
        Self {
            clues,
            loop_limit,
            cells,
            order,
            rays,
            watchers,
            shading: Grid::with_size(rows, cols),
            frames: Vec::new(),
        }
    }

    pub fn run(mut self, max_solutions: usize, iteration_limit: u64) -> SearchOutcome {
        debug!(
            "Searching {} cells against {} clues",
            self.cells.len(),
            self.rays.len()
        );
        let mut solutions = Vec::new();
        let mut iterations = 0;
        let limit_reached = loop {
            if iterations >= iteration_limit {
                debug!("Search reached the iteration limit ({})", iteration_limit);
                break true;
            }
            iterations += 1;
            let depth = self.frames.len();
            if depth > 0 && !self.consistent(self.cells[depth - 1]) {
                if !self.next_branch() {
                    break false;
                }
                continue;
            }
            if depth == self.cells.len() {
                if satisfies_clues(self.clues, &self.shading) && self.loop_possible() {
                    trace!("Found solution #{}", solutions.len() + 1);
                    solutions.push(self.shading.clone());
                    if solutions.len() >= max_solutions {
                        break false;
                    }
                }
                if !self.next_branch() {
                    break false;
                }
                continue;
            }
            // leaving a cell unshaded is always tried first
            self.frames.push(Frame { shaded: false });
        };
        debug!(
            "Search finished with {} solution(s) after {} iterations",
            solutions.len(),
            iterations
        );
        SearchOutcome {
            solutions,
            limit_reached,
            iterations,
        }
    }

    /// Backtracks to the deepest frame that can still be shaded and shades it.
    /// Returns false when the search space is exhausted.
    fn next_branch(&mut self) -> bool {
        while let Some(frame) = self.frames.pop() {
            let cell = self.cells[self.frames.len()];
            if frame.shaded {
                self.shading[cell] = false;
                continue;
            }
            if self.can_shade(cell) {
                self.shading[cell] = true;
                self.frames.push(Frame { shaded: true });
                return true;
            }
        }
        false
    }

    fn can_shade(&self, cell: Coord) -> bool {
        !Direction::ALL
            .iter()
            .filter_map(|&d| self.shading.neighbor(cell, d))
            .any(|n| self.shading[n])
    }

    /// Checks every clue counting `cell` after it has been decided. A clue fails if it already
    /// sees too many shaded cells or can no longer reach its count.
    fn consistent(&self, cell: Coord) -> bool {
        let decided = self.frames.len();
        let clues_ok = self.watchers[cell].iter().all(|&i| {
            let ray = &self.rays[i];
            let shaded = ray.cells.iter().filter(|&&c| self.shading[c]).count();
            if shaded > ray.count {
                return false;
            }
            let undecided = ray
                .cells
                .iter()
                .filter(|&&c| self.order[c].map_or(false, |i| i >= decided))
                .count();
            shaded + undecided >= ray.count
        });
        clues_ok && (self.loop_limit.is_none() || self.has_loop_room(cell))
    }

    fn is_open(&self, cell: Coord) -> bool {
        self.clues[cell].is_none() && !self.shading[cell]
    }

    /// Every decided open cell at or next to `cell` needs two open neighbors for the loop.
    /// Undecided cells count as open.
    fn has_loop_room(&self, cell: Coord) -> bool {
        let decided = self.frames.len();
        iter::once(cell)
            .chain(
                Direction::ALL
                    .iter()
                    .filter_map(|&d| self.shading.neighbor(cell, d)),
            )
            .filter(|&c| self.is_open(c) && self.order[c].map_or(false, |i| i < decided))
            .all(|c| {
                Direction::ALL
                    .iter()
                    .filter_map(|&d| self.shading.neighbor(c, d))
                    .filter(|&n| self.is_open(n))
                    .count()
                    >= 2
            })
    }

    fn loop_possible(&self) -> bool {
        match self.loop_limit {
            None => true,
            Some(limit) => match search_loop(self.clues, &self.shading, limit) {
                LoopSearch::Found(_) | LoopSearch::LimitReached => true,
                LoopSearch::Impossible => {
                    trace!("Shading satisfies the clues but has no loop");
                    false
                }
            },
        }
    }
}
