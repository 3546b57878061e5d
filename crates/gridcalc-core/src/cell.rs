//! Cell raw and display values

use std::fmt;

/// The authoritative user input stored in a cell
///
/// Display values are always derived from the raw value by a recompute pass;
/// the raw value is the only thing an editor ever writes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Blank cell (no input)
    #[default]
    Empty,

    /// Numeric value
    Number(f64),

    /// String value; a string starting with `=` is a formula
    Text(String),
}

impl RawValue {
    /// Build a raw value from edit-field input
    ///
    /// Numeric-looking strings are coerced to numbers, everything else is
    /// kept as text; the empty string becomes [`RawValue::Empty`].
    pub fn from_input(input: &str) -> Self {
        if input.is_empty() {
            return RawValue::Empty;
        }
        match input.parse::<f64>() {
            Ok(n) if n.is_finite() => RawValue::Number(n),
            _ => RawValue::Text(input.to_string()),
        }
    }

    /// Check if this is a formula (text starting with `=`)
    pub fn is_formula(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.starts_with('='))
    }

    /// The formula source including the leading `=`, if this is a formula
    pub fn as_formula(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) if s.starts_with('=') => Some(s),
            _ => None,
        }
    }

    /// Check if the cell is blank
    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// The literal display form of a non-formula raw value
    pub fn literal_display(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Number(n) => format_number(*n),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::from_input(s)
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::from_input(&s)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal_display())
    }
}

/// Format a number for display: integral values print without a fraction
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A single grid cell: the user's raw input plus the derived display string
///
/// `val` is only meaningful after a recompute pass that included this cell's
/// `raw`; it is never persisted independently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Authoritative user input
    pub raw: RawValue,
    /// Derived display value, rewritten by every recompute pass
    pub val: String,
}

impl Cell {
    /// Create a cell with the given raw value and an empty display value
    pub fn new<V: Into<RawValue>>(raw: V) -> Self {
        Self {
            raw: raw.into(),
            val: String::new(),
        }
    }
}
