//! Solve the shading of Yajilin puzzles

use crate::puzzle::{Clues, Shading};

use self::search::SearchContext;

mod search;

/// Default ceiling on search steps for a single solve
pub const DEFAULT_ITERATION_LIMIT: u64 = 200_000;

/// Default ceiling on steps for each loop search when a loop is required
pub const DEFAULT_LOOP_ITERATION_LIMIT: u64 = 100_000;

pub enum SolveResult {
    /// No shading satisfies the clues - there may be an error in the puzzle
    Unsolvable,
    /// Exactly one shading satisfies the clues, as it should
    Solved(Shading),
    /// Multiple shadings satisfy the clues - this is not a proper puzzle
    MultipleSolutions,
    /// The search stopped at its iteration limit before it could decide
    Inconclusive,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    pub fn solved(&self) -> Option<&Shading> {
        match self {
            SolveResult::Solved(shading) => Some(shading),
            _ => None,
        }
    }
}

/// Every solution found by a search
pub struct SearchOutcome {
    pub solutions: Vec<Shading>,
    /// True if the search stopped at the iteration limit
    pub limit_reached: bool,
    pub iterations: u64,
}

pub struct PuzzleSolver<'a> {
    clues: &'a Clues,
    max_solutions: usize,
    iteration_limit: u64,
    require_loop: bool,
    loop_iteration_limit: u64,
}

impl<'a> PuzzleSolver<'a> {
    pub fn new(clues: &'a Clues) -> Self {
        Self {
            clues,
            max_solutions: 2,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            require_loop: false,
            loop_iteration_limit: DEFAULT_LOOP_ITERATION_LIMIT,
        }
    }

    /// Stop searching once this many solutions are found
    pub fn max_solutions(&mut self, max_solutions: usize) -> &mut Self {
        self.max_solutions = max_solutions;
        self
    }

    pub fn iteration_limit(&mut self, iteration_limit: u64) -> &mut Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// Only count shadings whose open cells can carry a single loop
    pub fn require_loop(&mut self, require_loop: bool) -> &mut Self {
        self.require_loop = require_loop;
        self
    }

    pub fn loop_iteration_limit(&mut self, loop_iteration_limit: u64) -> &mut Self {
        self.loop_iteration_limit = loop_iteration_limit;
        self
    }

    /// Enumerates shadings that satisfy every clue and have no adjacent shaded cells
    /// (and leave room for the loop if `require_loop` is set)
    pub fn search(&self) -> SearchOutcome {
        if self.max_solutions == 0 {
            return SearchOutcome {
                solutions: Vec::new(),
                limit_reached: false,
                iterations: 0,
            };
        }
        let loop_limit = if self.require_loop {
            Some(self.loop_iteration_limit)
        } else {
            None
        };
        SearchContext::new(self.clues, loop_limit).run(self.max_solutions, self.iteration_limit)
    }

    /// Decides whether the clues have no solution, exactly one, or several
    pub fn solve(&self) -> SolveResult {
        let mut outcome = PuzzleSolver {
            max_solutions: self.max_solutions.max(2),
            ..*self
        }
        .search();
        match outcome.solutions.len() {
            0 if !outcome.limit_reached => SolveResult::Unsolvable,
            1 if !outcome.limit_reached => SolveResult::Solved(outcome.solutions.remove(0)),
            n if n >= 2 => SolveResult::MultipleSolutions,
            _ => SolveResult::Inconclusive,
        }
    }
}

/// Returns up to `max_solutions` shadings satisfying the clues
pub fn solve(clues: &Clues, max_solutions: usize) -> Vec<Shading> {
    PuzzleSolver::new(clues)
        .max_solutions(max_solutions)
        .search()
        .solutions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::grid::{Coord, Direction, IsGrid};
    use crate::collections::Grid;
    use crate::puzzle::rules::{has_adjacency_violation, satisfies_clues};
    use crate::puzzle::Clue;

    fn clues(rows: usize, cols: usize, list: &[(usize, usize, Direction, u32)]) -> Clues {
        let mut clues = Grid::with_size(rows, cols);
        for &(r, c, d, n) in list {
            clues[Coord::new(r, c)] = Some(Clue::new(d, n));
        }
        clues
    }

    #[test]
    fn two_solutions_in_a_row() {
        let clues = clues(1, 3, &[(0, 0, Direction::East, 1)]);
        let solutions = solve(&clues, 10);
        assert_eq!(2, solutions.len());
        for s in &solutions {
            assert!(satisfies_clues(&clues, s));
            assert!(!has_adjacency_violation(s));
        }
    }

    #[test]
    fn unique_solution() {
        let clues = clues(
            1,
            4,
            &[(0, 0, Direction::East, 1), (0, 2, Direction::East, 0)],
        );
        let result = PuzzleSolver::new(&clues).solve();
        let shading = result.solved().expect("unique");
        assert_eq!(
            vec![false, true, false, false],
            shading.iter().copied().collect::<Vec<_>>()
        );
    }

    #[test]
    fn unsolvable() {
        let clues = clues(1, 3, &[(0, 0, Direction::East, 2)]);
        assert!(matches!(
            PuzzleSolver::new(&clues).solve(),
            SolveResult::Unsolvable
        ));
    }

    #[test]
    fn multiple_solutions() {
        let clues = clues(2, 2, &[(0, 0, Direction::South, 0)]);
        assert!(matches!(
            PuzzleSolver::new(&clues).solve(),
            SolveResult::MultipleSolutions
        ));
    }

    #[test]
    fn iteration_limit_is_inconclusive() {
        let clues = clues(6, 6, &[(0, 0, Direction::East, 2)]);
        let mut solver = PuzzleSolver::new(&clues);
        solver.iteration_limit(3);
        let outcome = solver.search();
        assert!(outcome.limit_reached);
        assert!(matches!(solver.solve(), SolveResult::Inconclusive));
    }

    #[test]
    fn soundness() {
        let clues = clues(
            4,
            4,
            &[
                (0, 0, Direction::East, 1),
                (3, 3, Direction::North, 1),
                (2, 1, Direction::West, 0),
            ],
        );
        let solutions = solve(&clues, 1000);
        assert!(!solutions.is_empty());
        for s in &solutions {
            assert_eq!(clues.rows(), s.rows());
            assert!(satisfies_clues(&clues, s));
            assert!(!has_adjacency_violation(s));
        }
    }

    #[test]
    fn loop_rules_out_shadings() {
        // every ring cell but the one below the clue could be shaded without the loop
        let clues = clues(3, 3, &[(1, 1, Direction::North, 0)]);
        assert!(matches!(
            PuzzleSolver::new(&clues).solve(),
            SolveResult::MultipleSolutions
        ));
        let result = PuzzleSolver::new(&clues).require_loop(true).solve();
        let shading = result.solved().expect("unique");
        assert!(shading.iter().all(|&s| !s));
    }

    #[test]
    fn no_room_for_a_loop() {
        let clues = clues(1, 3, &[]);
        assert!(!solve(&clues, 1).is_empty());
        assert!(matches!(
            PuzzleSolver::new(&clues).require_loop(true).solve(),
            SolveResult::Unsolvable
        ));
    }

    #[test]
    fn zero_max_solutions() {
        let clues = clues(2, 2, &[]);
        assert!(solve(&clues, 0).is_empty());
    }
}
