//! Formula evaluator
//!
//! A per-pass evaluator over an immutable grid snapshot. Each cell resolves
//! exactly once per pass; the result (value or error) is memoized so that
//! shared dependencies are not recomputed and dependency cycles are detected.
//!
//! Dependency chains are walked with an explicit work stack rather than
//! native recursion, so a long reference chain cannot overflow the call
//! stack. Only the arithmetic inside a single formula recurses, and that is
//! bounded by the formula's own length.

use crate::ast::{BinaryOp, Expr, Func};
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_formula;
use ahash::AHashMap;
use gridcalc_core::{format_number, Coord, Grid, RawValue};

/// The display string shown for any failed formula
pub const ERROR_DISPLAY: &str = "#ERROR!";

/// A resolved cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Empty,
}

impl Value {
    /// The display string for this value
    pub fn display(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Empty => String::new(),
        }
    }

    /// The numeric reading of this value in an arithmetic operand position;
    /// text and blanks count as zero
    pub fn as_operand(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(_) | Value::Empty => 0.0,
        }
    }
}

/// Resolution state of a cell within one pass
enum CellState {
    /// The cell's formula is on the work stack; hitting it again as a
    /// dependency means the chain loops
    InProgress,
    /// Final outcome for this pass
    Done(FormulaResult<Value>),
}

/// Single-pass evaluator over a grid snapshot
///
/// Holds the memoized per-cell outcomes for one recompute pass. Create a
/// fresh evaluator for every pass; reusing one across grid edits would serve
/// stale results.
///
/// # Example
/// ```rust
/// use gridcalc_core::{Coord, Grid};
/// use gridcalc_formula::Evaluator;
///
/// let grid = Grid::from_rows(&[&["2", "=A1*3"]]).unwrap();
/// let mut eval = Evaluator::new(&grid);
/// assert_eq!(eval.display(Coord::new(0, 1)), "6");
/// ```
pub struct Evaluator<'g> {
    grid: &'g Grid,
    states: AHashMap<Coord, CellState>,
}

/// A formula being resolved: its parsed body plus a cursor over its
/// dependency list
struct Frame {
    coord: Coord,
    expr: Expr,
    deps: Vec<Coord>,
    next_dep: usize,
}

impl<'g> Evaluator<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            states: AHashMap::new(),
        }
    }

    /// Resolve a cell to its value or error, memoized for this pass
    pub fn resolve(&mut self, coord: Coord) -> FormulaResult<Value> {
        if let Some(CellState::Done(outcome)) = self.states.get(&coord) {
            return outcome.clone();
        }
        self.run(coord);
        match self.states.get(&coord) {
            Some(CellState::Done(outcome)) => outcome.clone(),
            _ => Err(FormulaError::BadFormula("unresolved cell".into())),
        }
    }

    /// Resolve a cell to its display string; failed formulas all display
    /// as [`ERROR_DISPLAY`]
    pub fn display(&mut self, coord: Coord) -> String {
        match self.resolve(coord) {
            Ok(value) => value.display(),
            Err(_) => ERROR_DISPLAY.to_string(),
        }
    }

    /// Drive the work stack until `coord` has a final outcome
    fn run(&mut self, coord: Coord) {
        let mut stack: Vec<Frame> = Vec::new();
        self.begin(coord, &mut stack);

        while let Some(frame) = stack.last_mut() {
            if frame.next_dep >= frame.deps.len() {
                // All dependencies settled; the frame's own arithmetic can run
                let Some(frame) = stack.pop() else { break };
                let outcome = self.eval_expr(&frame.expr);
                self.states.insert(frame.coord, CellState::Done(outcome));
                continue;
            }

            let dep = frame.deps[frame.next_dep];
            if matches!(self.states.get(&dep), Some(CellState::Done(_))) {
                frame.next_dep += 1;
                continue;
            }
            if matches!(self.states.get(&dep), Some(CellState::InProgress)) {
                // The dependency sits below us on the stack: a cycle. This
                // frame fails now; the frames beneath fail in turn when they
                // see this outcome.
                let failed = frame.coord;
                self.states
                    .insert(failed, CellState::Done(Err(FormulaError::CircularReference)));
                stack.pop();
                continue;
            }
            self.begin(dep, &mut stack);
        }
    }

    /// Give `coord` a state: literals and parse failures settle immediately,
    /// well-formed formulas go on the work stack as `InProgress`
    fn begin(&mut self, coord: Coord, stack: &mut Vec<Frame>) {
        let raw = match self.grid.raw(coord) {
            Ok(raw) => raw,
            Err(e) => {
                self.states
                    .insert(coord, CellState::Done(Err(FormulaError::from(e))));
                return;
            }
        };

        match raw.as_formula() {
            None => {
                let value = literal_value(raw);
                self.states.insert(coord, CellState::Done(Ok(value)));
            }
            Some(source) => match parse_formula(source) {
                Err(e) => {
                    self.states.insert(coord, CellState::Done(Err(e)));
                }
                Ok(expr) => {
                    let deps = expr.references();
                    self.states.insert(coord, CellState::InProgress);
                    stack.push(Frame {
                        coord,
                        expr,
                        deps,
                        next_dep: 0,
                    });
                }
            },
        }
    }

    /// Evaluate a formula body whose dependencies have all settled
    ///
    /// Errors propagate fail-fast, left to right: the first failing operand
    /// fails the whole formula.
    fn eval_expr(&self, expr: &Expr) -> FormulaResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),

            Expr::CellRef(coord) => self.dep_value(*coord),

            Expr::BinaryOp { op, left, right } => {
                let lhs = self.eval_expr(left)?.as_operand();
                let rhs = self.eval_expr(right)?.as_operand();
                let result = match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Subtract => lhs - rhs,
                    BinaryOp::Multiply => lhs * rhs,
                    BinaryOp::Divide => {
                        if rhs == 0.0 {
                            return Err(FormulaError::DivideByZero);
                        }
                        lhs / rhs
                    }
                };
                Ok(Value::Number(result))
            }

            Expr::Function { func, args } => {
                let mut sum = 0.0;
                for arg in args {
                    sum += self.eval_expr(arg)?.as_operand();
                }
                let result = match func {
                    Func::Sum => sum,
                    // The divisor counts every operand, text and blanks
                    // included
                    Func::Average => sum / args.len() as f64,
                };
                Ok(Value::Number(result))
            }
        }
    }

    /// The settled outcome of a dependency
    fn dep_value(&self, coord: Coord) -> FormulaResult<Value> {
        match self.states.get(&coord) {
            Some(CellState::Done(outcome)) => outcome.clone(),
            _ => Err(FormulaError::CircularReference),
        }
    }
}

/// The value of a non-formula cell
fn literal_value(raw: &RawValue) -> Value {
    match raw {
        RawValue::Empty => Value::Empty,
        RawValue::Number(n) => Value::Number(*n),
        RawValue::Text(s) => Value::Text(s.clone()),
    }
}
