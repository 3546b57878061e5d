//! Formula expression tree
//!
//! Ephemeral: built per formula, per recompute pass, never persisted.

use gridcalc_core::Coord;

/// A parsed formula expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),

    /// Reference to another cell
    CellRef(Coord),

    /// Binary arithmetic operation
    BinaryOp {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Aggregate function call over a flat operand list
    Function { func: Func, args: Vec<Expr> },
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// The recognized aggregate functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sum,
    Average,
}

impl Expr {
    /// The formula's dependency set: every distinct referenced coordinate,
    /// in first-appearance order
    pub fn references(&self) -> Vec<Coord> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references(&self, refs: &mut Vec<Coord>) {
        match self {
            Expr::Number(_) => {}
            Expr::CellRef(coord) => {
                if !refs.contains(coord) {
                    refs.push(*coord);
                }
            }
            Expr::BinaryOp { left, right, .. } => {
                left.collect_references(refs);
                right.collect_references(refs);
            }
            Expr::Function { args, .. } => {
                for arg in args {
                    arg.collect_references(refs);
                }
            }
        }
    }
}
