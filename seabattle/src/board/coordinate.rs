use std::{fmt, str::FromStr};

use thiserror::Error;

/// Number of rows and columns in a grid.
pub const GRID_SIZE: usize = 10;

/// Column letters, indexed by column.
const COLUMNS: [char; GRID_SIZE] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// The coordinates of a [`Space`][crate::board::Space] in a [`Grid`][crate::board::Grid].
///
/// Always in bounds. Rows `1..=10` are stored as `0..=9`, columns `A..=J` as `0..=9`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Row index, `0` is row `1`.
    row: usize,
    /// Column index, `0` is column `A`.
    col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from zero-based row and column indices. Returns `None`
    /// if either is out of bounds.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Build a coordinate from a column letter (case-insensitive) and a one-based row
    /// number, as they are written in a placement spec.
    pub fn from_label(column: char, row_number: usize) -> Option<Self> {
        let col = column_index(column)?;
        let row = row_number.checked_sub(1)?;
        Self::new(row, col)
    }

    /// Zero-based row index.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column index.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Letter of this coordinate's column.
    pub fn column_letter(&self) -> char {
        COLUMNS[self.col]
    }

    /// Row as written on the board, `1..=10`.
    pub fn row_number(&self) -> usize {
        self.row + 1
    }

    /// Iterate every coordinate of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Coordinate { row, col }))
    }

    /// Linear index of this coordinate in a row-major grid.
    pub(crate) fn linearize(&self) -> usize {
        self.row * GRID_SIZE + self.col
    }
}

/// Convert a column letter to its index.
pub fn column_index(column: char) -> Option<usize> {
    let upper = column.to_ascii_uppercase();
    COLUMNS.iter().position(|&c| c == upper)
}

/// Letter for a column index, if the index is in bounds.
pub fn column_letter(col: usize) -> Option<char> {
    COLUMNS.get(col).copied()
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row_number())
    }
}

/// Error returned when a string is not a coordinate label such as `C7`.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{0:?} is not a coordinate between A1 and J10")]
pub struct ParseCoordinateError(String);

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let column = chars.next();
        let row = chars.as_str().parse::<usize>().ok();
        match (column, row) {
            (Some(column), Some(row)) => Coordinate::from_label(column, row),
            _ => None,
        }
        .ok_or_else(|| ParseCoordinateError(s.to_owned()))
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}
