//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    // Coordinate types
    Coord,
    // Error types
    Error,
    // Evaluation types
    Evaluator,
    FormulaError,
    // Extension traits
    GridAutofillExt,
    GridCalculationExt,
    // Main types
    Grid,
    Range,
    RawValue,
    Result,
    ERROR_DISPLAY,
    MAX_COLS,
    // Constants
    MAX_ROWS,
};
