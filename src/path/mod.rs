//! Loop segments between orthogonally adjacent cells

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Debug, Display};
use std::iter::FromIterator;

use crate::collections::grid::{Coord, Direction, IsGrid};
use crate::HashSet;

pub use self::derive::derive_loop;
pub(crate) use self::derive::{search_loop, LoopSearch};
pub use self::validate::{check_solved, validate_loop, LoopError};

pub(crate) mod construct;
mod derive;
mod validate;

/// A segment of the loop between two orthogonally adjacent cells.
///
/// The smaller coordinate (row-major) is always stored first so that an edge has exactly one
/// representation regardless of the order its cells are given in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(Coord, Coord);

impl Edge {
    /// Creates the canonical edge between two adjacent cells
    pub fn new(a: Coord, b: Coord) -> Self {
        debug_assert!(a.is_adjacent(b), "{} and {} are not adjacent", a, b);
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }

    /// Creates the edge between two cells if they are orthogonally adjacent
    pub fn between(a: Coord, b: Coord) -> Option<Self> {
        if a.is_adjacent(b) {
            Some(Self::new(a, b))
        } else {
            None
        }
    }

    /// The edge leaving `coord` in `direction`, if the neighbor is inside the grid
    pub fn from_direction(grid: &impl IsGrid, coord: Coord, direction: Direction) -> Option<Self> {
        grid.neighbor(coord, direction).map(|n| Self::new(coord, n))
    }

    pub fn cells(self) -> [Coord; 2] {
        [self.0, self.1]
    }

    pub fn touches(self, coord: Coord) -> bool {
        self.0 == coord || self.1 == coord
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// The set of directions in which a cell is connected to its neighbors
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Connections(u8);

impl Connections {
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= 1 << direction.index();
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.iter().copied().filter(move |&d| self.contains(d))
    }

    /// Parses a compass pair such as `ne`. Letters may come in either order.
    pub fn from_letters(s: &str) -> Option<Self> {
        let mut connections = Self::default();
        let mut chars = 0;
        for c in s.chars() {
            let direction = Direction::from_letter(c)?;
            if connections.contains(direction) {
                return None;
            }
            connections.insert(direction);
            chars += 1;
        }
        if chars == 2 {
            Some(connections)
        } else {
            None
        }
    }
}

/// Writes connected directions in `Direction::ALL` order, e.g. `ns`, `se`
impl Display for Connections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.iter() {
            write!(f, "{}", d.letter())?;
        }
        Ok(())
    }
}

impl Debug for Connections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Connections({})", self)
    }
}

impl FromIterator<Direction> for Connections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut connections = Self::default();
        for d in iter {
            connections.insert(d);
        }
        connections
    }
}

/// A set of loop segments, iterated in canonical order
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct SegmentSet {
    edges: BTreeSet<Edge>,
}

impl SegmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the closed loop visiting `cells` in order
    pub fn from_cycle(cells: &[Coord]) -> Self {
        let mut segments = Self::new();
        for (i, &cell) in cells.iter().enumerate() {
            let next = cells[(i + 1) % cells.len()];
            segments.insert(Edge::new(cell, next));
        }
        segments
    }

    pub fn insert(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    pub fn remove(&mut self, edge: Edge) -> bool {
        self.edges.remove(&edge)
    }

    /// Adds the edge if absent and removes it if present. Returns true if the edge is now present.
    pub fn toggle(&mut self, edge: Edge) -> bool {
        if self.edges.remove(&edge) {
            false
        } else {
            self.edges.insert(edge);
            true
        }
    }

    pub fn contains(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// Removes every edge touching `coord`
    pub fn remove_touching(&mut self, coord: Coord) {
        self.edges.retain(|e| !e.touches(coord));
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Every cell touched by at least one edge
    pub fn touched_cells(&self) -> BTreeSet<Coord> {
        self.edges.iter().flat_map(|e| e.cells().to_vec()).collect()
    }
}

impl Debug for SegmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.edges.iter()).finish()
    }
}

impl FromIterator<Edge> for SegmentSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Edge;
    type IntoIter = btree_set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Returns the directions in which `coord` has a segment
pub fn cell_connections(segments: &SegmentSet, coord: Coord, grid: &impl IsGrid) -> Connections {
    Direction::ALL
        .iter()
        .copied()
        .filter(|&d| Edge::from_direction(grid, coord, d).map_or(false, |e| segments.contains(e)))
        .collect()
}

/// Result of following segments from a starting cell
#[derive(Debug, PartialEq)]
pub(crate) enum Walk {
    /// Came back to the start after visiting this many distinct cells
    Closed(usize),
    /// Stepped onto an already visited cell other than the start
    Revisited,
    /// Reached a cell with no way forward
    DeadEnd,
}

/// Follows segments from `start`, never stepping back to the previous cell
pub(crate) fn walk_loop(segments: &SegmentSet, start: Coord, grid: &impl IsGrid) -> Walk {
    let mut visited = HashSet::new();
    visited.insert(start);
    let mut previous = None;
    let mut current = start;
    loop {
        let next = cell_connections(segments, current, grid)
            .iter()
            .filter_map(|d| grid.neighbor(current, d))
            .find(|&n| Some(n) != previous);
        let next = match next {
            Some(next) => next,
            None => return Walk::DeadEnd,
        };
        if next == start {
            return Walk::Closed(visited.len());
        }
        if !visited.insert(next) {
            return Walk::Revisited;
        }
        previous = Some(current);
        current = next;
    }
}

/// True if the segments form exactly one closed loop
pub(crate) fn is_single_cycle(segments: &SegmentSet, grid: &impl IsGrid) -> bool {
    let touched = segments.touched_cells();
    let start = match touched.iter().next() {
        Some(&start) => start,
        None => return false,
    };
    touched
        .iter()
        .all(|&c| cell_connections(segments, c, grid).len() == 2)
        && walk_loop(segments, start, grid) == Walk::Closed(touched.len())
}
