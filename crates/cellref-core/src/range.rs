//! Range reference type

use crate::cell::CellReference;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A rectangular block of cells (e.g., "A1:B10")
///
/// Corners are stored exactly as given. Nothing reorders them, so a range
/// built from `B2` and `A1` keeps `B2` as its first corner. Size and
/// containment queries work on either corner order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeReference {
    top_left: CellReference,
    bottom_right: CellReference,
}

impl RangeReference {
    /// Create a range from two corners
    pub fn new(top_left: CellReference, bottom_right: CellReference) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Create a range from 1-based column/row indices
    pub fn from_indices(
        start_column: u32,
        start_row: u32,
        end_column: u32,
        end_row: u32,
    ) -> Result<Self> {
        Ok(Self::new(
            CellReference::new(start_column, start_row)?,
            CellReference::new(end_column, end_row)?,
        ))
    }

    /// Parse a range from `A1:B10` notation
    ///
    /// A bare cell reference parses as a single-cell range.
    ///
    /// ```
    /// use cellref_core::RangeReference;
    ///
    /// let range = RangeReference::parse("a1:$c$3").unwrap();
    /// assert_eq!(range.to_string(), "A1:$C$3");
    /// assert_eq!(range.width(), 3);
    ///
    /// let single = RangeReference::parse("B2").unwrap();
    /// assert!(single.is_single_cell());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((start, end)) => {
                if start.is_empty() || end.is_empty() || end.contains(':') {
                    tracing::trace!(range = s, "rejected range reference");
                    return Err(Error::MalformedRange(s.to_string()));
                }
                Ok(Self::new(
                    CellReference::parse(start)?,
                    CellReference::parse(end)?,
                ))
            }
            None => CellReference::parse(s).map(Self::from),
        }
    }

    /// First corner
    pub fn top_left(&self) -> CellReference {
        self.top_left
    }

    /// Second corner
    pub fn bottom_right(&self) -> CellReference {
        self.bottom_right
    }

    /// Whether both corners address the same cell
    pub fn is_single_cell(&self) -> bool {
        self.top_left.same_cell(&self.bottom_right)
    }

    /// Number of columns covered
    pub fn width(&self) -> u32 {
        self.top_left
            .column_index()
            .abs_diff(self.bottom_right.column_index())
            + 1
    }

    /// Number of rows covered
    pub fn height(&self) -> u32 {
        self.top_left.row().abs_diff(self.bottom_right.row()) + 1
    }

    /// Total number of cells covered
    pub fn cell_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Check if a cell lies within this range (anchors ignored)
    pub fn contains(&self, cell: &CellReference) -> bool {
        let (min_col, max_col) = self.column_bounds();
        let (min_row, max_row) = self.row_bounds();

        (min_col..=max_col).contains(&cell.column_index())
            && (min_row..=max_row).contains(&cell.row())
    }

    /// Force every anchor flag on, in place
    pub fn make_absolute(&mut self) -> &mut Self {
        self.top_left.make_absolute(true, true);
        self.bottom_right.make_absolute(true, true);
        self
    }

    /// Copy with every anchor flag on (`$A$1:$B$2`)
    pub fn to_absolute(mut self) -> Self {
        self.make_absolute();
        self
    }

    /// Shift both corners, keeping their anchors
    pub fn make_offset(&self, column_delta: i32, row_delta: i32) -> Result<Self> {
        let shift = |corner: CellReference| -> Result<CellReference> {
            Ok(corner.make_offset(column_delta, row_delta)?.with_anchors(
                corner.is_absolute_column(),
                corner.is_absolute_row(),
            ))
        };

        Ok(Self::new(shift(self.top_left)?, shift(self.bottom_right)?))
    }

    /// Iterate over all cells in the range (row by row)
    pub fn cells(&self) -> RangeCells {
        let (min_col, _) = self.column_bounds();
        let (min_row, _) = self.row_bounds();

        RangeCells {
            range: *self,
            current_row: min_row,
            current_col: min_col,
            remaining: self.cell_count(),
        }
    }

    fn column_bounds(&self) -> (u32, u32) {
        let a = self.top_left.column_index();
        let b = self.bottom_right.column_index();
        (a.min(b), a.max(b))
    }

    fn row_bounds(&self) -> (u32, u32) {
        let a = self.top_left.row();
        let b = self.bottom_right.row();
        (a.min(b), a.max(b))
    }
}

impl From<CellReference> for RangeReference {
    fn from(cell: CellReference) -> Self {
        Self::new(cell, cell)
    }
}

impl fmt::Display for RangeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top_left == self.bottom_right {
            write!(f, "{}", self.top_left)
        } else {
            write!(f, "{}:{}", self.top_left, self.bottom_right)
        }
    }
}

impl FromStr for RangeReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct RangeCells {
    range: RangeReference,
    current_row: u32,
    current_col: u32,
    remaining: u64,
}

impl Iterator for RangeCells {
    type Item = CellReference;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Every position between two valid corners is itself valid
        let cell = CellReference::new(self.current_col, self.current_row).ok()?;
        self.remaining -= 1;

        let (min_col, max_col) = self.range.column_bounds();
        self.current_col += 1;
        if self.current_col > max_col {
            self.current_col = min_col;
            self.current_row += 1;
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RangeCells {}
