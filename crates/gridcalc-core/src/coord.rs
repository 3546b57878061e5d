//! Cell coordinates, addresses, and ranges
//!
//! A [`Coord`] is the internal zero-based (row, col) identity of a cell. Its
//! string form is an [address](Coord::to_address) like `"A1"`: one column
//! letter followed by a one-based row number. The addressable window is a
//! single letter of column (A-Z) and up to two digits of row, so a sheet can
//! never be wider than [`MAX_COLS`] or taller than [`MAX_ROWS`].

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A zero-based (row, col) cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Row index (0-based internally, 1-based in the address form)
    pub row: u32,
    /// Column index (0-based, A=0 .. Z=25)
    pub col: u16,
}

impl Coord {
    /// Create a new coordinate
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a coordinate from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::Coord;
    ///
    /// let coord = Coord::parse("A1").unwrap();
    /// assert_eq!(coord, Coord::new(0, 0));
    ///
    /// let coord = Coord::parse("C12").unwrap();
    /// assert_eq!(coord, Coord::new(11, 2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();

        // One letter followed by one or two digits, nothing else.
        if bytes.len() < 2 || bytes.len() > 3 {
            return Err(Error::MalformedAddress(s.into()));
        }
        if !bytes[0].is_ascii_uppercase() || !bytes[1..].iter().all(u8::is_ascii_digit) {
            return Err(Error::MalformedAddress(s.into()));
        }

        let col = letter_to_column(bytes[0] as char)?;

        // Rows are 1-based in the address form, 0-based internally
        let row: u32 = s[1..]
            .parse()
            .map_err(|_| Error::MalformedAddress(s.into()))?;
        if row == 0 {
            return Err(Error::MalformedAddress(s.into()));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Format as an A1-style address
    ///
    /// Fails with [`Error::InvalidColumn`] / [`Error::RowOutOfBounds`] when
    /// the coordinate has no single-letter, two-digit address.
    pub fn to_address(&self) -> Result<String> {
        if self.row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(self.row, MAX_ROWS - 1));
        }
        let letter = column_to_letter(self.col)?;
        Ok(format!("{}{}", letter, self.row + 1))
    }

    /// Shift the coordinate by a (row, col) delta
    ///
    /// Fails when the result would leave the addressable window.
    pub fn translate(&self, d_row: i64, d_col: i64) -> Result<Self> {
        let row = self.row as i64 + d_row;
        let col = self.col as i64 + d_col;
        if row < 0 || row >= MAX_ROWS as i64 {
            return Err(Error::RowOutOfBounds(row.max(0) as u32, MAX_ROWS - 1));
        }
        if col < 0 || col >= MAX_COLS as i64 {
            return Err(Error::InvalidColumn(col.max(0) as u16, MAX_COLS - 1));
        }
        Ok(Self::new(row as u32, col as u16))
    }

    /// Move the coordinate to the nearest point inside the range
    pub fn clamp_to(&self, bounds: &Range) -> Self {
        let bounds = bounds.normalized();
        Self {
            row: self.row.clamp(bounds.start.row, bounds.end.row),
            col: self.col.clamp(bounds.start.col, bounds.end.col),
        }
    }

    /// Create a range from this coordinate to another
    pub fn to(&self, other: Coord) -> Range {
        Range::new(*self, other)
    }

    /// True if the coordinate sits on the first row of the normalized range
    pub fn is_at_top_edge(&self, range: &Range) -> bool {
        let range = range.normalized();
        range.contains(self) && self.row == range.start.row
    }

    /// True if the coordinate sits on the last row of the normalized range
    pub fn is_at_bottom_edge(&self, range: &Range) -> bool {
        let range = range.normalized();
        range.contains(self) && self.row == range.end.row
    }

    /// True if the coordinate sits on the first column of the normalized range
    pub fn is_at_left_edge(&self, range: &Range) -> bool {
        let range = range.normalized();
        range.contains(self) && self.col == range.start.col
    }

    /// True if the coordinate sits on the last column of the normalized range
    pub fn is_at_right_edge(&self, range: &Range) -> bool {
        let range = range.normalized();
        range.contains(self) && self.col == range.end.col
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_address() {
            Ok(addr) => write!(f, "{}", addr),
            // Out-of-window coordinates still need a readable form for errors
            Err(_) => write!(f, "({},{})", self.row, self.col),
        }
    }
}

impl FromStr for Coord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a column index to its letter (0 = A, 25 = Z)
pub fn column_to_letter(col: u16) -> Result<char> {
    if col >= MAX_COLS {
        return Err(Error::InvalidColumn(col, MAX_COLS - 1));
    }
    Ok((b'A' + col as u8) as char)
}

/// Convert a column letter to its index (A = 0, Z = 25)
pub fn letter_to_column(letter: char) -> Result<u16> {
    if !letter.is_ascii_uppercase() {
        return Err(Error::MalformedAddress(letter.to_string()));
    }
    Ok(letter as u16 - 'A' as u16)
}

/// A rectangular block of cells, stored as an (anchor, far corner) pair
///
/// The two corners may be given in either orientation; operations that need a
/// top-left/bottom-right pair normalize first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Anchor corner (not necessarily top-left)
    pub start: Coord,
    /// Far corner (not necessarily bottom-right)
    pub end: Coord,
}

impl Range {
    /// Create a new range; the corners are kept as given
    pub fn new(start: Coord, end: Coord) -> Self {
        Self { start, end }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            Coord::new(start_row, start_col),
            Coord::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(coord: Coord) -> Self {
        Self {
            start: coord,
            end: coord,
        }
    }

    /// Parse a range from `A1:B10` notation (a bare address is a single cell)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((start, end)) = s.split_once(':') {
            Ok(Self::new(Coord::parse(start)?, Coord::parse(end)?))
        } else {
            Ok(Self::single(Coord::parse(s)?))
        }
    }

    /// Return the range with the minimum corner first and maximum corner second
    ///
    /// Idempotent: normalizing a normalized range is a no-op.
    pub fn normalized(&self) -> Self {
        Self {
            start: Coord::new(
                self.start.row.min(self.end.row),
                self.start.col.min(self.end.col),
            ),
            end: Coord::new(
                self.start.row.max(self.end.row),
                self.start.col.max(self.end.col),
            ),
        }
    }

    /// Inclusive containment check
    pub fn contains(&self, coord: &Coord) -> bool {
        let r = self.normalized();
        coord.row >= r.start.row
            && coord.row <= r.end.row
            && coord.col >= r.start.col
            && coord.col <= r.end.col
    }

    /// Number of rows spanned
    pub fn row_count(&self) -> u32 {
        let r = self.normalized();
        r.end.row - r.start.row + 1
    }

    /// Number of columns spanned
    pub fn col_count(&self) -> u16 {
        let r = self.normalized();
        r.end.col - r.start.col + 1
    }

    /// Total number of cells spanned
    pub fn size(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Move the range to the nearest position inside `bounds`, corner by corner
    pub fn clamp_to(&self, bounds: &Range) -> Self {
        Self {
            start: self.start.clamp_to(bounds),
            end: self.end.clamp_to(bounds),
        }
    }

    /// Iterate over every coordinate in the normalized range, row-major
    ///
    /// Each call produces a fresh iterator; there is no shared cursor state.
    pub fn cells(&self) -> RangeIter {
        let r = self.normalized();
        RangeIter {
            range: r,
            current_row: r.start.row,
            current_col: r.start.col,
            done: false,
        }
    }

    /// Format as an `A1:B10` string (single-cell ranges print as one address)
    pub fn to_address(&self) -> Result<String> {
        if self.size() == 1 {
            self.start.to_address()
        } else {
            Ok(format!(
                "{}:{}",
                self.start.to_address()?,
                self.end.to_address()?
            ))
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_address() {
            Ok(addr) => write!(f, "{}", addr),
            Err(_) => write!(f, "{}..{}", self.start, self.end),
        }
    }
}

impl FromStr for Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Expand a range address into a comma-separated list of cell addresses
///
/// Row-major, e.g. `"A1:B2"` becomes `"A1,B1,A2,B2"`. Formula preprocessing
/// uses this to turn range tokens into plain operand lists.
pub fn expand_address_range(range_addr: &str) -> Result<String> {
    let range = Range::parse(range_addr)?;
    let mut addrs = Vec::with_capacity(range.size() as usize);
    for coord in range.cells() {
        addrs.push(coord.to_address()?);
    }
    Ok(addrs.join(","))
}

/// Row-major iterator over the coordinates of a range
pub struct RangeIter {
    range: Range,
    current_row: u32,
    current_col: u16,
    done: bool,
}

impl Iterator for RangeIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let coord = Coord::new(self.current_row, self.current_col);

        if self.current_col < self.range.end.col {
            self.current_col += 1;
        } else if self.current_row < self.range.end.row {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        } else {
            self.done = true;
        }

        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.range.size() as usize;
        (total, Some(total))
    }
}
