//! # gridcalc
//!
//! A small spreadsheet formula engine.
//!
//! Gridcalc keeps a dense grid of cells, each holding the user's raw input
//! and a derived display string. Raw values that start with `=` are formulas
//! over the four arithmetic operators, parentheses, `A1`-style references,
//! and the `SUM`/`AVERAGE` aggregates (with `A1:B2` ranges). A full recompute
//! pass derives every display value at once; any formula failure shows as
//! `#ERROR!` without disturbing unrelated cells.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::from_rows(&[
//!     &["1", "2", "3"],
//!     &["=SUM(A1:C1)", "=A2*2", ""],
//! ]).unwrap();
//!
//! grid.recompute();
//! assert_eq!(grid.display(Coord::parse("A2").unwrap()).unwrap(), "6");
//! assert_eq!(grid.display(Coord::parse("B2").unwrap()).unwrap(), "12");
//!
//! // Fill B2's formula across the row, then recompute
//! let origin = Coord::parse("B2").unwrap();
//! grid.autofill(origin, Range::parse("B2:C2").unwrap()).unwrap();
//! grid.recompute();
//! // C2 received "=B2*2"
//! assert_eq!(grid.display(Coord::parse("C2").unwrap()).unwrap(), "24");
//! ```

pub mod autofill;
pub mod calculation;
pub mod prelude;

// Re-export extension traits
pub use autofill::GridAutofillExt;
pub use calculation::GridCalculationExt;

// Re-export core types
pub use gridcalc_core::{
    column_to_letter,
    expand_address_range,
    format_number,
    letter_to_column,
    // Cell types
    Cell,
    // Coordinate types
    Coord,
    // Error types
    Error,
    Range,
    RangeIter,
    RawValue,
    Result,
    // Main types
    Grid,
    MAX_COLS,
    // Constants
    MAX_ROWS,
};

// Re-export formula types
pub use gridcalc_formula::{
    parse_formula, shift_references, Evaluator, Expr, FormulaError, FormulaResult, Value,
    ERROR_DISPLAY,
};
