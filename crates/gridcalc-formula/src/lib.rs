//! # gridcalc-formula
//!
//! Formula parsing and evaluation for the gridcalc spreadsheet engine.
//!
//! Formulas are strings starting with `=` supporting the four arithmetic
//! operators, parentheses, cell references (`A1` through `Z99`), and the
//! `SUM`/`AVERAGE` aggregates over flat operand lists, with `A1:B2` ranges
//! expanded before parsing. Evaluation is per-pass and memoized; any failure
//! (bad syntax, circular reference, division by zero) displays as `#ERROR!`.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Coord, Grid};
//! use gridcalc_formula::{Evaluator, ERROR_DISPLAY};
//!
//! let grid = Grid::from_rows(&[
//!     &["1", "2", "=SUM(A1:B1)"],
//!     &["=C1*2", "", "=A1/B9"],
//! ]).unwrap();
//!
//! let mut eval = Evaluator::new(&grid);
//! assert_eq!(eval.display(Coord::parse("C1").unwrap()), "3");
//! assert_eq!(eval.display(Coord::parse("A2").unwrap()), "6");
//! assert_eq!(eval.display(Coord::parse("C2").unwrap()), ERROR_DISPLAY);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod translate;

// Re-exports for convenience
pub use ast::{BinaryOp, Expr, Func};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{Evaluator, Value, ERROR_DISPLAY};
pub use parser::parse_formula;
pub use translate::shift_references;
