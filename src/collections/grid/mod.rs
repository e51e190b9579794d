mod coord;
mod direction;

pub use self::coord::Coord;
pub use self::direction::Direction;

use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Deref, Index, IndexMut, Range};

/// Anything with rectangular grid dimensions
pub trait IsGrid {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    fn contains(&self, coord: Coord) -> bool {
        coord.row() < self.rows() && coord.col() < self.cols()
    }

    fn coord_at(&self, index: usize) -> Coord {
        assert!(index < self.len());
        Coord::new(index / self.cols(), index % self.cols())
    }

    fn index_of(&self, coord: Coord) -> usize {
        assert!(self.contains(coord), "{} is outside the grid", coord);
        coord.row() * self.cols() + coord.col()
    }

    /// Returns the cell next to `coord` in `direction` if it is inside the grid
    fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (row, col) = (coord.row(), coord.col());
        let (row, col) = match direction {
            Direction::North => (row.checked_sub(1)?, col),
            Direction::South => (row + 1, col),
            Direction::East => (row, col + 1),
            Direction::West => (row, col.checked_sub(1)?),
        };
        let neighbor = Coord::new(row, col);
        if self.contains(neighbor) {
            Some(neighbor)
        } else {
            None
        }
    }

    /// Returns every cell strictly beyond `coord` in `direction`, up to the edge of the grid
    fn ray(&self, coord: Coord, direction: Direction) -> Vec<Coord> {
        let mut cells = Vec::new();
        let mut current = coord;
        while let Some(next) = self.neighbor(current, direction) {
            cells.push(next);
            current = next;
        }
        cells
    }

    /// Iterates over every coordinate in row-major order
    fn coords(&self) -> Coords {
        Coords {
            cols: self.cols(),
            range: 0..self.len(),
        }
    }
}

pub struct Coords {
    cols: usize,
    range: Range<usize>,
}

impl Iterator for Coords {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        self.range
            .next()
            .map(|i| Coord::new(i / self.cols, i % self.cols))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

/// A container of elements arranged in rows and columns
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    elements: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a new grid of the specified size filled with the default value
    pub fn with_size(rows: usize, cols: usize) -> Grid<T>
    where
        T: Clone + Default,
    {
        Self::with_size_and_value(rows, cols, T::default())
    }

    /// Creates a new grid of the specified size filled with a specified value
    pub fn with_size_and_value(rows: usize, cols: usize, val: T) -> Grid<T>
    where
        T: Clone,
    {
        Grid {
            rows,
            cols,
            elements: vec![val; rows * cols],
        }
    }

    /// Creates a new grid by calling `f` for every coordinate in row-major order
    pub fn from_fn(rows: usize, cols: usize, f: impl FnMut(Coord) -> T) -> Grid<T> {
        let elements = UnitGrid::new(rows, cols).coords().map(f).collect();
        Grid {
            rows,
            cols,
            elements,
        }
    }

    /// Returns an iterator over the rows of the grid
    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> {
        self.elements.chunks(self.cols.max(1))
    }

    /// Returns an iterator over every element, paired with its `Coord`
    pub fn iter_coord(&self) -> impl Iterator<Item = (Coord, &T)> {
        let cols = self.cols;
        self.elements
            .iter()
            .enumerate()
            .map(move |(i, e)| (Coord::new(i / cols, i % cols), e))
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        if self.contains(coord) {
            Some(&self[coord])
        } else {
            None
        }
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            elements: self.elements.iter().map(f).collect(),
        }
    }

    pub fn has_same_size<U>(&self, other: &Grid<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}

impl<T> Deref for Grid<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T> IsGrid for Grid<T> {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.elements[self.index_of(coord)]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        let index = self.index_of(coord);
        &mut self.elements[index]
    }
}

impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let len = self
            .elements
            .iter()
            .map(|e| e.to_string().len())
            .max()
            .unwrap_or(0);
        for row in self.row_slices() {
            for element in row {
                write!(f, "{:>1$} ", element, len)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Debug> Debug for Grid<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.row_slices()).finish()
    }
}

/// Dimensions of a grid without any elements
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitGrid {
    rows: usize,
    cols: usize,
}

impl UnitGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl IsGrid for UnitGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }
}

#[derive(PartialEq)]
pub struct NonRectangular(usize);

impl Debug for NonRectangular {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} has a different length than the first row", self.0)
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T> {
    type Error = NonRectangular;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut elements = Vec::with_capacity(row_count * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(NonRectangular(i));
            }
            elements.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            elements,
        })
    }
}
