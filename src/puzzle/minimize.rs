use crate::collections::grid::{Coord, IsGrid};
use crate::puzzle::{Clues, GeneratorConfig, Shading};
use crate::random::PuzzleRng;
use crate::solve::SolveResult;

/// Removes clues in random order as long as `solution` stays the only solution.
///
/// The result is always a subset of `clues`. If the result cannot be verified as unique, `clues`
/// is returned unchanged.
pub fn minimize_clues(
    clues: &Clues,
    solution: &Shading,
    rng: &mut PuzzleRng,
    config: &GeneratorConfig,
) -> Clues {
    let mut cells: Vec<Coord> = clues.coords().filter(|&c| clues[c].is_some()).collect();
    rng.shuffle(&mut cells);
    let mut minimized = clues.clone();
    for &cell in &cells {
        let clue = minimized[cell].take();
        if !has_unique_solution(&minimized, solution, config) {
            minimized[cell] = clue;
        }
    }
    if !has_unique_solution(&minimized, solution, config) {
        warn!("Minimized clues no longer have a unique solution, keeping all clues");
        return clues.clone();
    }
    let kept = minimized.iter().filter(|c| c.is_some()).count();
    debug!("Minimized clues from {} to {}", cells.len(), kept);
    minimized
}

/// True if the solver finds `solution` and nothing else
pub(crate) fn has_unique_solution(
    clues: &Clues,
    solution: &Shading,
    config: &GeneratorConfig,
) -> bool {
    match config.solver(clues).solve() {
        SolveResult::Solved(shading) => &shading == solution,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;
    use crate::collections::grid::Direction;
    use crate::collections::Grid;
    use crate::puzzle::Clue;

    /// A row has no room for a loop, so only the shading is checked
    fn shading_only() -> GeneratorConfig {
        GeneratorConfig {
            require_loop: false,
            ..GeneratorConfig::default()
        }
    }

    fn row_clues(list: &[(usize, Direction, u32)]) -> Clues {
        let mut clues = Grid::with_size(1, 4);
        for &(c, d, n) in list {
            clues[Coord::new(0, c)] = Some(Clue::new(d, n));
        }
        clues
    }

    #[test]
    fn removes_redundant_clue() {
        let clues = row_clues(&[
            (0, Direction::East, 1),
            (2, Direction::East, 0),
            (3, Direction::West, 1),
        ]);
        let solution = Grid::try_from(vec![vec![false, true, false, false]]).unwrap();
        for seed in 0..10 {
            let minimized = minimize_clues(
                &clues,
                &solution,
                &mut PuzzleRng::from_seed(seed),
                &shading_only(),
            );
            assert_eq!(
                row_clues(&[(0, Direction::East, 1), (2, Direction::East, 0)]),
                minimized
            );
            assert!(has_unique_solution(&minimized, &solution, &shading_only()));
        }
    }

    #[test]
    fn ambiguous_clues_unchanged() {
        let clues = row_clues(&[(0, Direction::East, 1)]);
        let solution = Grid::try_from(vec![vec![false, true, false, false]]).unwrap();
        let minimized = minimize_clues(
            &clues,
            &solution,
            &mut PuzzleRng::from_seed(1),
            &shading_only(),
        );
        assert_eq!(clues, minimized);
    }

    #[test]
    fn keeps_clues_the_loop_cannot_absorb() {
        // perimeter loop around two shaded cells and two clues
        let mut clues: Clues = Grid::with_size(4, 4);
        clues[Coord::new(1, 2)] = Some(Clue::new(Direction::West, 1));
        clues[Coord::new(2, 1)] = Some(Clue::new(Direction::East, 1));
        let solution = Grid::from_fn(4, 4, |c| c == Coord::new(1, 1) || c == Coord::new(2, 2));
        let config = GeneratorConfig::default();
        assert!(has_unique_solution(&clues, &solution, &config));
        assert!(!has_unique_solution(&clues, &solution, &shading_only()));
        for seed in 0..5 {
            let mut rng = PuzzleRng::from_seed(seed);
            assert_eq!(clues, minimize_clues(&clues, &solution, &mut rng, &config));
        }
    }
}
