use std::cmp::Reverse;

use itertools::Itertools;

use crate::collections::grid::{Coord, Direction, IsGrid, UnitGrid};
use crate::collections::Grid;
use crate::error::InvalidPuzzle;
use crate::path::construct::random_loop;
use crate::path::{derive_loop, SegmentSet};
use crate::puzzle::minimize::minimize_clues;
use crate::puzzle::rules::count_shaded_in_direction;
use crate::puzzle::{Clue, Clues, Puzzle, Shading};
use crate::random::PuzzleRng;
use crate::solve::{
    PuzzleSolver, SolveResult, DEFAULT_ITERATION_LIMIT, DEFAULT_LOOP_ITERATION_LIMIT,
};

/// Largest number of rows or columns a generated puzzle may have
pub const MAX_SIZE: usize = 16;
const MIN_SIZE: usize = 2;

/// Limits and targets for puzzle generation
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Generation attempts before falling back to a fixed pattern
    pub max_attempts: usize,
    /// Iteration ceiling for each solver run
    pub solver_iteration_limit: u64,
    /// Iteration ceiling for each loop search
    pub loop_iteration_limit: u64,
    /// Uniqueness only considers shadings that leave room for a loop
    pub require_loop: bool,
    /// Fraction of all cells to shade
    pub shaded_density: f64,
    /// Fraction of all cells the constructed loop should pass through
    pub loop_coverage: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            solver_iteration_limit: DEFAULT_ITERATION_LIMIT,
            loop_iteration_limit: DEFAULT_LOOP_ITERATION_LIMIT,
            require_loop: true,
            shaded_density: 0.2,
            loop_coverage: 0.6,
        }
    }
}

impl GeneratorConfig {
    /// A solver with these limits
    pub fn solver<'a>(&self, clues: &'a Clues) -> PuzzleSolver<'a> {
        let mut solver = PuzzleSolver::new(clues);
        solver
            .iteration_limit(self.solver_iteration_limit)
            .require_loop(self.require_loop)
            .loop_iteration_limit(self.loop_iteration_limit);
        solver
    }
}

#[derive(Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a puzzle whose shading is uniquely determined by its clues.
    ///
    /// The same size and seed always produce the same puzzle. If no attempt succeeds, a fixed
    /// pattern puzzle is returned instead.
    pub fn generate(&self, rows: usize, cols: usize, seed: u64) -> Result<Puzzle, InvalidPuzzle> {
        for &size in &[rows, cols] {
            if size < MIN_SIZE || size > MAX_SIZE {
                return Err(InvalidPuzzle::new(format!(
                    "{}x{} is outside of the supported sizes {}..={}",
                    rows, cols, MIN_SIZE, MAX_SIZE
                )));
            }
        }
        let mut rng = PuzzleRng::from_seed(seed);
        for attempt in 1..=self.config.max_attempts {
            if let Some(puzzle) = self.attempt(UnitGrid::new(rows, cols), &mut rng) {
                info!(
                    "Generated {}x{} puzzle with {} clues on attempt {}",
                    rows,
                    cols,
                    puzzle.clue_count(),
                    attempt
                );
                return Ok(puzzle);
            }
            debug!("Attempt {} failed", attempt);
        }
        warn!(
            "No {}x{} puzzle after {} attempts, using the fallback pattern",
            rows, cols, self.config.max_attempts
        );
        Ok(fallback_puzzle(rows, cols))
    }

    fn attempt(&self, grid: UnitGrid, rng: &mut PuzzleRng) -> Option<Puzzle> {
        let (shading, clues, path) = self.unique_shading(grid, rng)?;
        let minimized = minimize_clues(&clues, &shading, rng, &self.config);
        let (clues, path) = self.solution_path(minimized, clues, &shading, path);
        match Puzzle::new(clues, shading, path) {
            Ok(puzzle) => Some(puzzle),
            Err(e) => {
                warn!("Discarding generated puzzle: {}", e);
                None
            }
        }
    }

    /// A random shading, clues that determine it and a loop through every other cell
    fn unique_shading(
        &self,
        grid: UnitGrid,
        rng: &mut PuzzleRng,
    ) -> Option<(Shading, Clues, SegmentSet)> {
        let max_loop_cells = (grid.len() as f64 * self.config.loop_coverage) as usize;
        let constructed = random_loop(grid, max_loop_cells, rng);
        let on_loop = constructed.touched_cells();
        let off_loop: Vec<Coord> = grid.coords().filter(|c| !on_loop.contains(c)).collect();

        let shading = self.random_shading(grid, &off_loop, rng)?;
        let candidates = clue_candidates(&shading, rng);
        let (clues, path) = self.unique_clues(&shading, &off_loop, &candidates, constructed)?;
        Some((shading, clues, path))
    }

    /// Shades off-loop cells in random order, never next to another shaded cell
    fn random_shading(
        &self,
        grid: UnitGrid,
        off_loop: &[Coord],
        rng: &mut PuzzleRng,
    ) -> Option<Shading> {
        let target = (grid.len() as f64 * self.config.shaded_density) as usize;
        let minimum = (grid.len() / 10).max(1);
        let mut order = off_loop.to_vec();
        rng.shuffle(&mut order);
        let mut shading: Shading = Grid::with_size(grid.rows(), grid.cols());
        let mut count = 0;
        for cell in order {
            if count >= target {
                break;
            }
            let blocked = Direction::ALL
                .iter()
                .filter_map(|&d| grid.neighbor(cell, d))
                .any(|n| shading[n]);
            if !blocked {
                shading[cell] = true;
                count += 1;
            }
        }
        if count < minimum {
            debug!("Only {} cells could be shaded, need {}", count, minimum);
            return None;
        }
        Some(shading)
    }

    /// Gives every unshaded off-loop cell its best candidate clue, then adds clues on loop
    /// cells until the solver finds exactly one shading. A clue on a loop cell is only added if
    /// a loop still passes through the remaining open cells.
    fn unique_clues(
        &self,
        shading: &Shading,
        off_loop: &[Coord],
        candidates: &[(Coord, Clue)],
        constructed: SegmentSet,
    ) -> Option<(Clues, SegmentSet)> {
        let mut clues: Clues = Grid::with_size(shading.rows(), shading.cols());
        for &(coord, clue) in candidates {
            if clues[coord].is_none() && off_loop.contains(&coord) {
                clues[coord] = Some(clue);
            }
        }
        let mut path = constructed;
        let mut candidates = candidates.iter();
        loop {
            let result = self.config.solver(&clues).solve();
            match result {
                SolveResult::Solved(solution) if &solution == shading => {
                    return Some((clues, path));
                }
                SolveResult::MultipleSolutions => {
                    let mut added = false;
                    for &(coord, clue) in &mut candidates {
                        if clues[coord].is_some() {
                            continue;
                        }
                        clues[coord] = Some(clue);
                        match derive_loop(&clues, shading, self.config.loop_iteration_limit) {
                            Some(rerouted) => {
                                path = rerouted;
                                added = true;
                                break;
                            }
                            None => clues[coord] = None,
                        }
                    }
                    if !added {
                        debug!("Ran out of clue candidates");
                        return None;
                    }
                }
                _ => {
                    debug!("Clues do not lead to the intended shading");
                    return None;
                }
            }
        }
    }

    /// Picks the loop of the final puzzle. Cells that lost their clue must be visited by the
    /// loop. If no such loop is found, every removed clue is put back and the loop is kept.
    fn solution_path(
        &self,
        minimized: Clues,
        clues: Clues,
        shading: &Shading,
        path: SegmentSet,
    ) -> (Clues, SegmentSet) {
        if minimized == clues {
            return (clues, path);
        }
        match derive_loop(&minimized, shading, self.config.loop_iteration_limit) {
            Some(derived) => {
                debug!("Derived a loop of {} segments", derived.len());
                (minimized, derived)
            }
            None => {
                debug!("No loop through the minimized clues, keeping all clues");
                (clues, path)
            }
        }
    }
}

/// Every clue that could be placed on an unshaded cell, most informative first
fn clue_candidates(shading: &Shading, rng: &mut PuzzleRng) -> Vec<(Coord, Clue)> {
    let mut candidates = Vec::new();
    for cell in shading.coords().filter(|&c| !shading[c]) {
        for &direction in &Direction::ALL {
            if shading.neighbor(cell, direction).is_none() {
                continue;
            }
            let count = count_shaded_in_direction(shading, cell, direction);
            candidates.push((cell, Clue::new(direction, count as u32)));
        }
    }
    candidates
        .into_iter()
        .map(|candidate| (candidate, rng.gen_index(4)))
        .sorted_by_key(|&((_, clue), jitter)| {
            (clue.count == 0, Reverse(clue.count as usize * 4 + jitter))
        })
        .map(|(candidate, _)| candidate)
        .collect()
}

/// The loop around the edge of the grid
fn perimeter(rows: usize, cols: usize) -> Vec<Coord> {
    let top = (0..cols).map(|c| Coord::new(0, c));
    let right = (1..rows).map(|r| Coord::new(r, cols - 1));
    let bottom = (0..cols - 1).rev().map(|c| Coord::new(rows - 1, c));
    let left = (1..rows - 1).rev().map(|r| Coord::new(r, 0));
    top.chain(right).chain(bottom).chain(left).collect()
}

/// A puzzle built without the solver: the loop runs around the edge of the grid, interior cells
/// with an even coordinate sum are shaded and every other interior cell holds a clue.
///
/// Panics if either dimension is less than 2.
pub fn fallback_puzzle(rows: usize, cols: usize) -> Puzzle {
    assert!(rows >= MIN_SIZE && cols >= MIN_SIZE);
    let interior =
        |c: Coord| c.row() > 0 && c.col() > 0 && c.row() + 1 < rows && c.col() + 1 < cols;
    let shading: Shading =
        Grid::from_fn(rows, cols, |c| interior(c) && (c.row() + c.col()) % 2 == 0);
    let mut clues: Clues = Grid::with_size(rows, cols);
    let clue_cells = shading.coords().filter(|&c| interior(c) && !shading[c]);
    for (i, cell) in clue_cells.enumerate() {
        let direction = Direction::ALL[i % Direction::ALL.len()];
        let count = count_shaded_in_direction(&shading, cell, direction);
        clues[cell] = Some(Clue::new(direction, count as u32));
    }
    let path = SegmentSet::from_cycle(&perimeter(rows, cols));
    Puzzle::from_parts(clues, shading, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::validate_loop;
    use crate::puzzle::minimize::has_unique_solution;
    use crate::puzzle::rules::{has_adjacency_violation, satisfies_clues};

    #[test]
    fn perimeter_is_a_ring() {
        let ring = perimeter(3, 4);
        assert_eq!(10, ring.len());
        for (i, &cell) in ring.iter().enumerate() {
            assert!(cell.is_adjacent(ring[(i + 1) % ring.len()]));
        }
    }

    #[test]
    fn fallback_is_valid() {
        for &(rows, cols) in &[(2, 2), (2, 5), (3, 3), (5, 4), (16, 16)] {
            let puzzle = fallback_puzzle(rows, cols);
            let shading = puzzle.solution_shading();
            assert!(!has_adjacency_violation(shading));
            assert!(satisfies_clues(puzzle.clues(), shading));
            assert_eq!(
                Ok(()),
                validate_loop(puzzle.solution_path(), shading, puzzle.clues())
            );
        }
    }

    #[test]
    fn fallback_when_attempts_run_out() {
        let generator = Generator::new(GeneratorConfig {
            max_attempts: 0,
            ..GeneratorConfig::default()
        });
        let puzzle = generator.generate(4, 4, 1).unwrap();
        assert_eq!(fallback_puzzle(4, 4), puzzle);
    }

    #[test]
    fn attempts_succeed() {
        let generator = Generator::default();
        let mut rng = PuzzleRng::from_seed(3);
        let puzzles: Vec<Puzzle> = (0..10)
            .filter_map(|_| generator.attempt(UnitGrid::new(5, 5), &mut rng))
            .collect();
        assert!(!puzzles.is_empty());
        for puzzle in &puzzles {
            assert!(has_unique_solution(
                puzzle.clues(),
                puzzle.solution_shading(),
                generator.config()
            ));
        }
    }

    #[test]
    fn minimized_clues_are_a_unique_subset() {
        let generator = Generator::default();
        let mut rng = PuzzleRng::from_seed(8);
        let mut checked = 0;
        for _ in 0..20 {
            let grid = UnitGrid::new(5, 5);
            let (shading, clues, path) = match generator.unique_shading(grid, &mut rng) {
                Some(found) => found,
                None => continue,
            };
            assert_eq!(Ok(()), validate_loop(&path, &shading, &clues));
            assert!(has_unique_solution(&clues, &shading, generator.config()));
            let minimized = minimize_clues(&clues, &shading, &mut rng, generator.config());
            for cell in clues.coords() {
                assert!(minimized[cell].is_none() || minimized[cell] == clues[cell]);
            }
            assert!(has_unique_solution(&minimized, &shading, generator.config()));
            let (final_clues, final_path) =
                generator.solution_path(minimized, clues, &shading, path);
            assert_eq!(Ok(()), validate_loop(&final_path, &shading, &final_clues));
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn rejects_sizes() {
        let generator = Generator::default();
        assert!(generator.generate(1, 5, 0).is_err());
        assert!(generator.generate(5, 0, 0).is_err());
        assert!(generator.generate(MAX_SIZE + 1, 5, 0).is_err());
    }

    #[test]
    fn candidates_ordered_by_count() {
        let shading = Grid::from_fn(4, 4, |c| c == Coord::new(0, 0) || c == Coord::new(2, 2));
        let candidates = clue_candidates(&shading, &mut PuzzleRng::from_seed(4));
        let counts: Vec<u32> = candidates.iter().map(|(_, clue)| clue.count).collect();
        let zeros = counts.iter().position(|&n| n == 0).unwrap();
        assert!(counts[..zeros].windows(2).all(|w| w[0] >= w[1]));
        assert!(counts[zeros..].iter().all(|&n| n == 0));
        assert!(candidates.iter().all(|(c, _)| !shading[*c]));
    }
}
