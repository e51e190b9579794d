//! Shading rules shared by the solver, the validator and the play session

use crate::collections::grid::{Coord, Direction, IsGrid};
use crate::puzzle::{Clue, Clues, Shading};

/// Counts shaded cells strictly beyond `coord` in `direction`, up to the edge of the grid
pub fn count_shaded_in_direction(shading: &Shading, coord: Coord, direction: Direction) -> usize {
    let mut count = 0;
    let mut current = coord;
    while let Some(next) = shading.neighbor(current, direction) {
        if shading[next] {
            count += 1;
        }
        current = next;
    }
    count
}

pub fn clue_satisfied(shading: &Shading, coord: Coord, clue: Clue) -> bool {
    count_shaded_in_direction(shading, coord, clue.direction) == clue.count as usize
}

/// True if `coord` is shaded and any orthogonal neighbor is also shaded
pub fn has_adjacent_shaded(shading: &Shading, coord: Coord) -> bool {
    shading[coord]
        && Direction::ALL
            .iter()
            .filter_map(|&d| shading.neighbor(coord, d))
            .any(|n| shading[n])
}

pub fn has_adjacency_violation(shading: &Shading) -> bool {
    shading.coords().any(|c| has_adjacent_shaded(shading, c))
}

/// True if no clue cell is shaded and every clue is satisfied
pub fn satisfies_clues(clues: &Clues, shading: &Shading) -> bool {
    clues.iter_coord().all(|(coord, clue)| match clue {
        Some(clue) => !shading[coord] && clue_satisfied(shading, coord, *clue),
        None => true,
    })
}
