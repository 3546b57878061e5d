//! # gridcalc-core
//!
//! Core data structures for the gridcalc spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`Coord`] and [`Range`] - cell addressing, normalization, enumeration
//! - [`RawValue`] and [`Cell`] - user input and derived display values
//! - [`Grid`] - the owned table of cells
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Coord, Grid, RawValue};
//!
//! let mut grid = Grid::new(3, 3).unwrap();
//! grid.set_raw(Coord::parse("A1").unwrap(), "42").unwrap();
//! assert_eq!(grid.raw(Coord::new(0, 0)).unwrap(), &RawValue::Number(42.0));
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod grid;

// Re-exports for convenience
pub use cell::{format_number, Cell, RawValue};
pub use coord::{
    column_to_letter, expand_address_range, letter_to_column, Coord, Range, RangeIter,
};
pub use error::{Error, Result};
pub use grid::Grid;

/// Maximum number of rows addressable with a two-digit row number
pub const MAX_ROWS: u32 = 99;

/// Maximum number of columns addressable with a single letter (A-Z)
pub const MAX_COLS: u16 = 26;
