//! The grid: an owned, dense table of cells

use crate::cell::{Cell, RawValue};
use crate::coord::{Coord, Range};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A dense, fixed-size table of [`Cell`]s
///
/// The grid owns every cell and is the only mutable state of the engine.
/// Callers mutate one cell's raw value at a time (or apply an autofill) and
/// then run a full recompute; display values are only consistent after that
/// recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u32,
    cols: u16,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a blank grid
    ///
    /// Dimensions are bounded by the addressable window (26 columns,
    /// 99 rows) and must be non-zero.
    pub fn new(rows: u32, cols: u16) -> Result<Self> {
        if rows == 0 || rows > MAX_ROWS || cols == 0 || cols > MAX_COLS {
            return Err(Error::InvalidDimensions(rows, cols));
        }
        let cells = (0..rows)
            .map(|_| (0..cols).map(|_| Cell::default()).collect())
            .collect();
        Ok(Self { rows, cols, cells })
    }

    /// Create a grid seeded from rows of edit-field input
    ///
    /// Every row must have the same length. Input strings go through the
    /// usual numeric coercion of [`RawValue::from_input`].
    ///
    /// # Example
    /// ```
    /// use gridcalc_core::Grid;
    ///
    /// let grid = Grid::from_rows(&[
    ///     &["1", "2", "3"],
    ///     &["4", "5", "6"],
    ///     &["7", "8", "9"],
    /// ]).unwrap();
    /// assert_eq!(grid.row_count(), 3);
    /// ```
    pub fn from_rows(rows: &[&[&str]]) -> Result<Self> {
        let row_count = rows.len() as u32;
        let col_count = rows.first().map_or(0, |r| r.len()) as u16;
        let mut grid = Self::new(row_count, col_count)?;

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() as u16 != col_count {
                return Err(Error::InvalidDimensions(row_count, row.len() as u16));
            }
            for (col_idx, input) in row.iter().enumerate() {
                grid.cells[row_idx][col_idx].raw = RawValue::from_input(input);
            }
        }
        Ok(grid)
    }

    /// Number of rows
    pub fn row_count(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn col_count(&self) -> u16 {
        self.cols
    }

    /// The range covering the whole grid
    pub fn bounds(&self) -> Range {
        Range::from_indices(0, 0, self.rows - 1, self.cols - 1)
    }

    /// Check whether a coordinate falls inside the grid
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.contains(&coord) {
            Ok(())
        } else {
            Err(Error::OutOfBounds(coord.to_string(), self.rows, self.cols))
        }
    }

    /// Store a new raw value at a coordinate
    ///
    /// Has no visible effect on any display value until the next recompute.
    pub fn set_raw<V: Into<RawValue>>(&mut self, coord: Coord, raw: V) -> Result<()> {
        self.check_bounds(coord)?;
        self.cells[coord.row as usize][coord.col as usize].raw = raw.into();
        Ok(())
    }

    /// The unmodified raw value at a coordinate (seeds edit-start flows)
    pub fn raw(&self, coord: Coord) -> Result<&RawValue> {
        self.check_bounds(coord)?;
        Ok(&self.cells[coord.row as usize][coord.col as usize].raw)
    }

    /// The display value produced by the most recent recompute
    pub fn display(&self, coord: Coord) -> Result<&str> {
        self.check_bounds(coord)?;
        Ok(&self.cells[coord.row as usize][coord.col as usize].val)
    }

    /// Overwrite the display value at a coordinate
    ///
    /// Recompute passes use this to store their results; it is not meant for
    /// editors, which only ever write raw values.
    pub fn set_display(&mut self, coord: Coord, val: String) -> Result<()> {
        self.check_bounds(coord)?;
        self.cells[coord.row as usize][coord.col as usize].val = val;
        Ok(())
    }

    /// Iterate over every coordinate of the grid, row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Coord::new(row, col)))
    }
}
