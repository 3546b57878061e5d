//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while parsing or evaluating a formula
///
/// Every kind surfaces to the user as the same `"#ERROR!"` display string;
/// the discriminant exists for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula contains a character or identifier outside the grammar
    #[error("Invalid token in formula: {0}")]
    InvalidToken(String),

    /// Formula parses to nothing evaluable (empty body, unresolved operand, ...)
    #[error("Bad formula: {0}")]
    BadFormula(String),

    /// A formula transitively depends on itself
    #[error("Circular reference detected")]
    CircularReference,

    /// Arithmetic division by a zero operand
    #[error("Division by zero")]
    DivideByZero,
}

impl From<gridcalc_core::Error> for FormulaError {
    fn from(e: gridcalc_core::Error) -> Self {
        FormulaError::BadFormula(e.to_string())
    }
}
