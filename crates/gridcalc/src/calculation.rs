//! Grid recompute pass
//!
//! Derives every cell's display value from the current raw values in one
//! full pass. A pass never fails: every formula failure is encoded in the
//! cell's display string as `#ERROR!`.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut grid = Grid::new(2, 2).unwrap();
//! grid.set_raw(Coord::parse("A1").unwrap(), "10").unwrap();
//! grid.set_raw(Coord::parse("B1").unwrap(), "=A1*2").unwrap();
//! grid.recompute();
//! assert_eq!(grid.display(Coord::parse("B1").unwrap()).unwrap(), "20");
//! ```

use gridcalc_core::{Coord, Grid};
use gridcalc_formula::Evaluator;

/// Extension trait for [`Grid`] to add recompute methods
pub trait GridCalculationExt {
    /// Recompute every display value from the current raw values
    ///
    /// Always succeeds; a pure function of the current raws.
    fn recompute(&mut self);
}

impl GridCalculationExt for Grid {
    fn recompute(&mut self) {
        let coords: Vec<Coord> = self.coords().collect();

        // One evaluator per pass: shared dependencies resolve once, and the
        // memo table doubles as the cycle detector.
        let results: Vec<(Coord, String)> = {
            let mut evaluator = Evaluator::new(self);
            coords
                .into_iter()
                .map(|coord| (coord, evaluator.display(coord)))
                .collect()
        };

        for (coord, val) in results {
            // Coordinates came from this grid, the write cannot miss
            let _ = self.set_display(coord, val);
        }
    }
}
