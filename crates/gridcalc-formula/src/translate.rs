//! Reference translation for autofill
//!
//! Rewrites the cell references inside a formula body by a fixed row/column
//! offset, textually. Everything that is not a reference (operators, numbers,
//! function names) passes through unchanged.

use gridcalc_core::{Coord, Result};
use lazy_regex::regex;

/// Shift every cell reference in `formula` by the given offsets
///
/// Fails if any shifted reference would leave the addressable window
/// (columns A-Z, rows 1-99); in that case the input is not partially
/// rewritten, the whole operation errors.
///
/// # Example
/// ```rust
/// use gridcalc_formula::shift_references;
///
/// let shifted = shift_references("=A1+B2*2", 1, 0).unwrap();
/// assert_eq!(shifted, "=A2+B3*2");
/// ```
pub fn shift_references(formula: &str, d_row: i64, d_col: i64) -> Result<String> {
    let re = regex!(r"[A-Z][0-9]{1,2}");
    let mut out = String::with_capacity(formula.len());
    let mut last = 0;
    for m in re.find_iter(formula) {
        out.push_str(&formula[last..m.start()]);
        let coord = Coord::parse(m.as_str())?;
        let shifted = coord.translate(d_row, d_col)?;
        out.push_str(&shifted.to_address()?);
        last = m.end();
    }
    out.push_str(&formula[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shift_down() {
        assert_eq!(shift_references("=A1+B1", 2, 0).unwrap(), "=A3+B3");
    }

    #[test]
    fn test_shift_right() {
        assert_eq!(shift_references("=A1*A2", 0, 1).unwrap(), "=B1*B2");
    }

    #[test]
    fn test_shift_both_directions() {
        assert_eq!(shift_references("=C3", -1, -2).unwrap(), "=A2");
    }

    #[test]
    fn test_non_references_untouched() {
        assert_eq!(shift_references("=1+2*3", 5, 5).unwrap(), "=1+2*3");
        assert_eq!(
            shift_references("=SUM(A1,B2)", 1, 0).unwrap(),
            "=SUM(A2,B3)"
        );
    }

    #[test]
    fn test_range_references_shift() {
        assert_eq!(
            shift_references("=SUM(A1:A5)", 0, 1).unwrap(),
            "=SUM(B1:B5)"
        );
    }

    #[test]
    fn test_shift_out_of_window() {
        // Column Z cannot move right
        assert!(shift_references("=Z1", 0, 1).is_err());
        // Row 1 cannot move up
        assert!(shift_references("=A1", -1, 0).is_err());
        // Row 99 cannot move down
        assert!(shift_references("=A99", 1, 0).is_err());
    }

    #[test]
    fn test_lowercase_not_rewritten() {
        // Uncommitted lowercase input is left alone
        assert_eq!(shift_references("=a1+B1", 1, 0).unwrap(), "=a1+B2");
    }
}
