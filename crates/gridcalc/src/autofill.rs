//! Autofill: replicate one cell's raw value across a destination range
//!
//! Formula origins have their cell references shifted by each target's offset
//! from the origin; everything else is copied verbatim. Only raw values are
//! written, so the caller runs a recompute afterwards.

use gridcalc_core::{Coord, Error, Grid, Range, RawValue, Result};
use gridcalc_formula::shift_references;

/// Extension trait for [`Grid`] to add the autofill operation
pub trait GridAutofillExt {
    /// Fill `destination` from the cell at `origin`
    ///
    /// For each target cell the origin's raw value is copied; if the origin
    /// holds a formula, its references are shifted by the target's offset
    /// from the origin. If any shifted reference would leave the addressable
    /// window (columns A-Z, rows 1-99), or the destination is not fully
    /// inside the grid, the whole operation fails and no cell is written.
    ///
    /// # Example
    /// ```rust
    /// use gridcalc::prelude::*;
    ///
    /// let mut grid = Grid::from_rows(&[&["1", "2"], &["=A1*2", ""]]).unwrap();
    /// let origin = Coord::parse("A2").unwrap();
    /// grid.autofill(origin, Range::parse("A2:B2").unwrap()).unwrap();
    /// assert_eq!(grid.raw(Coord::parse("B2").unwrap()).unwrap(),
    ///            &RawValue::Text("=B1*2".into()));
    /// ```
    fn autofill(&mut self, origin: Coord, destination: Range) -> Result<()>;
}

impl GridAutofillExt for Grid {
    fn autofill(&mut self, origin: Coord, destination: Range) -> Result<()> {
        let source = self.raw(origin)?.clone();

        // Stage every write before touching the grid, so an out-of-window
        // shift leaves it unmodified
        let mut updates: Vec<(Coord, RawValue)> = Vec::new();
        for target in destination.cells() {
            if !self.contains(&target) {
                return Err(Error::OutOfBounds(
                    target.to_string(),
                    self.row_count(),
                    self.col_count(),
                ));
            }
            let raw = translate_raw(&source, origin, target)?;
            updates.push((target, raw));
        }

        for (target, raw) in updates {
            self.set_raw(target, raw)?;
        }
        Ok(())
    }
}

/// The raw value `target` receives when filling from `origin`
fn translate_raw(source: &RawValue, origin: Coord, target: Coord) -> Result<RawValue> {
    match source {
        RawValue::Text(s) if source.is_formula() => {
            let d_row = target.row as i64 - origin.row as i64;
            let d_col = target.col as i64 - origin.col as i64;
            Ok(RawValue::Text(shift_references(s, d_row, d_col)?))
        }
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw_text(grid: &Grid, addr: &str) -> String {
        match grid.raw(Coord::parse(addr).unwrap()).unwrap() {
            RawValue::Text(s) => s.clone(),
            other => panic!("expected text at {addr}, got {other:?}"),
        }
    }

    #[test]
    fn test_horizontal_fill_shifts_columns() {
        let mut grid = Grid::new(2, 4).unwrap();
        grid.set_raw(Coord::parse("A1").unwrap(), "=A2+B2").unwrap();
        grid.autofill(
            Coord::parse("A1").unwrap(),
            Range::parse("A1:D1").unwrap(),
        )
        .unwrap();

        assert_eq!(raw_text(&grid, "A1"), "=A2+B2");
        assert_eq!(raw_text(&grid, "B1"), "=B2+C2");
        assert_eq!(raw_text(&grid, "C1"), "=C2+D2");
        assert_eq!(raw_text(&grid, "D1"), "=D2+E2");
    }

    #[test]
    fn test_vertical_fill_shifts_rows() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set_raw(Coord::parse("B1").unwrap(), "=A1*2").unwrap();
        grid.autofill(
            Coord::parse("B1").unwrap(),
            Range::parse("B1:B3").unwrap(),
        )
        .unwrap();

        assert_eq!(raw_text(&grid, "B1"), "=A1*2");
        assert_eq!(raw_text(&grid, "B2"), "=A2*2");
        assert_eq!(raw_text(&grid, "B3"), "=A3*2");
    }

    #[test]
    fn test_non_formula_copies_verbatim() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.set_raw(Coord::parse("A1").unwrap(), "7").unwrap();
        grid.autofill(
            Coord::parse("A1").unwrap(),
            Range::parse("A1:C1").unwrap(),
        )
        .unwrap();
        for addr in ["A1", "B1", "C1"] {
            assert_eq!(
                grid.raw(Coord::parse(addr).unwrap()).unwrap(),
                &RawValue::Number(7.0)
            );
        }
    }

    #[test]
    fn test_overflow_leaves_grid_untouched() {
        let mut grid = Grid::new(1, 26).unwrap();
        grid.set_raw(Coord::parse("A1").unwrap(), "=Z1").unwrap();
        grid.set_raw(Coord::parse("B1").unwrap(), "before").unwrap();

        // Filling right of A1 shifts Z1 past column Z
        let err = grid.autofill(
            Coord::parse("A1").unwrap(),
            Range::parse("A1:B1").unwrap(),
        );
        assert!(err.is_err());
        assert_eq!(
            grid.raw(Coord::parse("B1").unwrap()).unwrap(),
            &RawValue::Text("before".into())
        );
    }

    #[test]
    fn test_destination_outside_grid() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_raw(Coord::parse("A1").unwrap(), "1").unwrap();
        assert!(grid
            .autofill(Coord::parse("A1").unwrap(), Range::parse("A1:C1").unwrap())
            .is_err());
    }

    #[test]
    fn test_unnormalized_destination() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.set_raw(Coord::parse("A1").unwrap(), "x").unwrap();
        // C1:A1 covers the same cells as A1:C1
        grid.autofill(
            Coord::parse("A1").unwrap(),
            Range::parse("C1:A1").unwrap(),
        )
        .unwrap();
        assert_eq!(raw_text(&grid, "C1"), "x");
    }
}
