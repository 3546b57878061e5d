//! End-to-end tests for autofill followed by recompute

use gridcalc::prelude::*;
use pretty_assertions::assert_eq;

fn show(grid: &Grid, addr: &str) -> String {
    grid.display(Coord::parse(addr).unwrap())
        .unwrap()
        .to_string()
}

fn raw(grid: &Grid, addr: &str) -> RawValue {
    grid.raw(Coord::parse(addr).unwrap()).unwrap().clone()
}

#[test]
fn test_fill_right_shifts_columns() {
    let mut grid = Grid::new(2, 4).unwrap();
    grid.set_raw(Coord::parse("A1").unwrap(), "=A2+B2").unwrap();
    grid.autofill(Coord::parse("A1").unwrap(), Range::parse("A1:D1").unwrap())
        .unwrap();

    assert_eq!(raw(&grid, "A1"), RawValue::Text("=A2+B2".into()));
    assert_eq!(raw(&grid, "B1"), RawValue::Text("=B2+C2".into()));
    assert_eq!(raw(&grid, "C1"), RawValue::Text("=C2+D2".into()));
    assert_eq!(raw(&grid, "D1"), RawValue::Text("=D2+E2".into()));
}

#[test]
fn test_fill_down_then_recompute() {
    let mut grid = Grid::from_rows(&[
        &["1", "=A1*10"],
        &["2", ""],
        &["3", ""],
    ])
    .unwrap();
    grid.autofill(Coord::parse("B1").unwrap(), Range::parse("B1:B3").unwrap())
        .unwrap();
    grid.recompute();

    assert_eq!(show(&grid, "B1"), "10");
    assert_eq!(show(&grid, "B2"), "20");
    assert_eq!(show(&grid, "B3"), "30");
}

#[test]
fn test_fill_literal_copies_verbatim() {
    let mut grid = Grid::from_rows(&[&["hi", "", ""], &["5", "", ""]]).unwrap();
    grid.autofill(Coord::parse("A1").unwrap(), Range::parse("A1:C1").unwrap())
        .unwrap();
    grid.autofill(Coord::parse("A2").unwrap(), Range::parse("A2:C2").unwrap())
        .unwrap();
    grid.recompute();

    for addr in ["A1", "B1", "C1"] {
        assert_eq!(show(&grid, addr), "hi");
    }
    for addr in ["A2", "B2", "C2"] {
        assert_eq!(show(&grid, addr), "5");
    }
}

#[test]
fn test_fill_range_formula() {
    let mut grid = Grid::from_rows(&[
        &["1", "2", "=SUM(A1:B1)"],
        &["3", "4", ""],
    ])
    .unwrap();
    grid.autofill(Coord::parse("C1").unwrap(), Range::parse("C1:C2").unwrap())
        .unwrap();
    grid.recompute();

    assert_eq!(raw(&grid, "C2"), RawValue::Text("=SUM(A2:B2)".into()));
    assert_eq!(show(&grid, "C1"), "3");
    assert_eq!(show(&grid, "C2"), "7");
}

/// A shift past the addressable window fails the whole fill atomically
#[test]
fn test_overflow_is_atomic() {
    let mut grid = Grid::new(3, 26).unwrap();
    grid.set_raw(Coord::parse("Y1").unwrap(), "=Z1").unwrap();
    grid.set_raw(Coord::parse("Y2").unwrap(), "keep").unwrap();
    grid.set_raw(Coord::parse("Y3").unwrap(), "keep").unwrap();

    // Row 3's copy would reference Z3, fine; but filling right from Y1
    // shifts the Z1 reference past column Z
    let result = grid.autofill(Coord::parse("Y1").unwrap(), Range::parse("Y1:Z1").unwrap());
    assert!(result.is_err());

    // A vertical fill over occupied cells that errors midway writes nothing
    grid.set_raw(Coord::parse("Y1").unwrap(), "=Y99").unwrap();
    let result = grid.autofill(Coord::parse("Y1").unwrap(), Range::parse("Y1:Y3").unwrap());
    assert!(result.is_err());
    assert_eq!(raw(&grid, "Y2"), RawValue::Text("keep".into()));
    assert_eq!(raw(&grid, "Y3"), RawValue::Text("keep".into()));
}

#[test]
fn test_destination_must_fit_grid() {
    let mut grid = Grid::new(2, 2).unwrap();
    grid.set_raw(Coord::parse("A1").unwrap(), "1").unwrap();
    assert!(grid
        .autofill(Coord::parse("A1").unwrap(), Range::parse("A1:A5").unwrap())
        .is_err());
}

#[test]
fn test_two_dimensional_fill() {
    let mut grid = Grid::from_rows(&[
        &["1", "2", "", ""],
        &["3", "4", "", ""],
        &["=A1+1", "", "", ""],
    ])
    .unwrap();
    grid.autofill(Coord::parse("A3").unwrap(), Range::parse("A3:B3").unwrap())
        .unwrap();
    grid.recompute();

    assert_eq!(show(&grid, "A3"), "2");
    assert_eq!(show(&grid, "B3"), "3");
}
