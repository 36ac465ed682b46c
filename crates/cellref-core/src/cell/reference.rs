//! Cell reference type

use crate::column::{column_index_from_letters, ColumnIndex};
use crate::error::{Error, Result};
use crate::range::RangeReference;
use crate::{MAX_COLUMN, MAX_ROW};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A cell reference (e.g., "A1", "$B$2")
///
/// Columns and rows are 1-based, matching the A1 text form. A `$` before the
/// column letters anchors the column, a `$` before the row digits anchors the
/// row. Anchored axes do not shift when a formula containing the reference is
/// copied elsewhere.
///
/// Two references are equal only when both position and anchors match, so
/// `A1 != $A$1`. Use [`CellReference::same_cell`] for a position-only check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellReference {
    column: ColumnIndex,
    row: u32,
    absolute_column: bool,
    absolute_row: bool,
}

impl CellReference {
    /// Create a relative reference from a 1-based column index and row
    ///
    /// This is the only place bounds are checked; every other constructor
    /// goes through it.
    pub fn new(column: u32, row: u32) -> Result<Self> {
        if row == 0 || row > MAX_ROW || column == 0 || column > MAX_COLUMN {
            return Err(Error::out_of_range(column, row));
        }

        Ok(Self {
            column: ColumnIndex::new(column)?,
            row,
            absolute_column: false,
            absolute_row: false,
        })
    }

    /// Create a relative reference from a resolved column
    pub fn from_column(column: ColumnIndex, row: u32) -> Result<Self> {
        Self::new(column.index(), row)
    }

    /// Create a relative reference from column letters and a row
    pub fn with_column_letters(letters: &str, row: u32) -> Result<Self> {
        Self::new(column_index_from_letters(letters)?, row)
    }

    /// Parse an A1-style reference
    ///
    /// # Examples
    /// ```
    /// use cellref_core::CellReference;
    ///
    /// let cell = CellReference::parse("B12").unwrap();
    /// assert_eq!(cell.column_index(), 2);
    /// assert_eq!(cell.row(), 12);
    ///
    /// let cell = CellReference::parse("$b$12").unwrap();
    /// assert!(cell.is_absolute_column());
    /// assert!(cell.is_absolute_row());
    /// assert_eq!(cell.to_string(), "$B$12");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (column_text, row_text) = split_reference(s)?;

        let (absolute_column, letters) = match column_text.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, column_text.as_str()),
        };
        let (absolute_row, digits) = match row_text.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, row_text),
        };

        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            tracing::trace!(reference = s, "rejected cell reference");
            return Err(Error::MalformedReference(s.to_string()));
        }

        let column = column_index_from_letters(letters)?;
        // Only overflow can fail here; it is out of range either way
        let row = digits.parse::<u32>().unwrap_or(u32::MAX);

        Ok(Self::new(column, row)?.with_anchors(absolute_column, absolute_row))
    }

    /// The column
    pub fn column(&self) -> ColumnIndex {
        self.column
    }

    /// The 1-based column index
    pub fn column_index(&self) -> u32 {
        self.column.index()
    }

    /// The 1-based row number
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Whether the column is anchored (`$A1`)
    pub fn is_absolute_column(&self) -> bool {
        self.absolute_column
    }

    /// Whether the row is anchored (`A$1`)
    pub fn is_absolute_row(&self) -> bool {
        self.absolute_row
    }

    /// Whether both axes are anchored (`$A$1`)
    pub fn is_absolute(&self) -> bool {
        self.absolute_column && self.absolute_row
    }

    pub fn set_absolute_column(&mut self, absolute: bool) {
        self.absolute_column = absolute;
    }

    pub fn set_absolute_row(&mut self, absolute: bool) {
        self.absolute_row = absolute;
    }

    /// Set both anchor flags in place
    pub fn make_absolute(&mut self, absolute_column: bool, absolute_row: bool) -> &mut Self {
        self.absolute_column = absolute_column;
        self.absolute_row = absolute_row;
        self
    }

    /// Return a copy with the given anchor flags
    pub fn with_anchors(mut self, absolute_column: bool, absolute_row: bool) -> Self {
        self.make_absolute(absolute_column, absolute_row);
        self
    }

    /// Return a copy with both anchors cleared
    pub fn to_relative(self) -> Self {
        self.with_anchors(false, false)
    }

    /// Compare grid positions only: row first, then column
    pub fn cmp_position(&self, other: &CellReference) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }

    /// Whether both references address the same cell, ignoring anchors
    pub fn same_cell(&self, other: &CellReference) -> bool {
        self.cmp_position(other) == Ordering::Equal
    }

    /// Shift by signed column and row deltas
    ///
    /// The result is a fresh relative reference; it fails with
    /// [`Error::CoordinateOutOfRange`] when it would leave the grid.
    ///
    /// ```
    /// use cellref_core::CellReference;
    ///
    /// let b2 = CellReference::parse("B2").unwrap();
    /// assert_eq!(b2.make_offset(1, 1).unwrap().to_string(), "C3");
    /// assert!(b2.make_offset(-2, 0).is_err());
    /// ```
    pub fn make_offset(&self, column_delta: i32, row_delta: i32) -> Result<Self> {
        let column = i64::from(self.column.index()) + i64::from(column_delta);
        let row = i64::from(self.row) + i64::from(row_delta);

        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => Self::new(column, row),
            _ => Err(Error::out_of_range(column, row)),
        }
    }

    /// One-cell range covering this reference
    pub fn to_range(self) -> RangeReference {
        RangeReference::from(self)
    }

    /// Range from this reference to another, corners kept as given
    pub fn to(self, other: CellReference) -> RangeReference {
        RangeReference::new(self, other)
    }
}

/// Row-major key for a reference: `row * MAX_COLUMN + column`
///
/// Anchor flags are ignored, so references that differ only in anchors share
/// a key.
pub fn reference_hash(reference: CellReference) -> u64 {
    u64::from(reference.row) * u64::from(MAX_COLUMN) + u64::from(reference.column.index())
}

/// Split text into its column part (letters, maybe a leading `$`) and the rest
fn split_reference(s: &str) -> Result<(String, &str)> {
    let mut column_part = true;
    let mut column = String::new();

    for c in s.chars() {
        if c.is_ascii_alphabetic() {
            if !column_part {
                tracing::trace!(reference = s, "letter after row digits");
                return Err(Error::MalformedReference(s.to_string()));
            }
            column.push(c.to_ascii_uppercase());
        } else if c == '$' {
            if column_part {
                if column.is_empty() {
                    column.push(c);
                } else {
                    column_part = false;
                }
            }
        } else if column_part {
            column_part = false;
        } else if !c.is_ascii_digit() {
            tracing::trace!(reference = s, "unexpected character in row");
            return Err(Error::MalformedReference(s.to_string()));
        }
    }

    // The column buffer is an ASCII prefix of `s`
    let row = &s[column.len()..];
    if row.is_empty() {
        return Err(Error::MalformedReference(s.to_string()));
    }

    Ok((column, row))
}

impl Default for CellReference {
    fn default() -> Self {
        Self {
            column: ColumnIndex::MIN,
            row: 1,
            absolute_column: false,
            absolute_row: false,
        }
    }
}

impl PartialOrd for CellReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellReference {
    /// Row, then column. Anchors only order references to the same cell.
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_position(other)
            .then_with(|| self.absolute_column.cmp(&other.absolute_column))
            .then_with(|| self.absolute_row.cmp(&other.absolute_row))
    }
}

impl Hash for CellReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(reference_hash(*self));
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute_column {
            f.write_str("$")?;
        }
        f.write_str(&self.column.to_letters())?;
        if self.absolute_row {
            f.write_str("$")?;
        }
        write!(f, "{}", self.row)
    }
}

impl FromStr for CellReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for CellReference {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::{BTreeSet, HashMap};

    fn cell(s: &str) -> CellReference {
        CellReference::parse(s).unwrap()
    }

    fn hash_of(r: &CellReference) -> u64 {
        let mut hasher = DefaultHasher::new();
        r.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_default_is_a1() {
        let r = CellReference::default();
        assert_eq!(r.column_index(), 1);
        assert_eq!(r.row(), 1);
        assert!(!r.is_absolute_column());
        assert!(!r.is_absolute_row());
        assert_eq!(r.to_string(), "A1");
    }

    #[test]
    fn test_new_bounds() {
        assert!(CellReference::new(1, 1).is_ok());
        assert!(CellReference::new(MAX_COLUMN, MAX_ROW).is_ok());

        assert_eq!(
            CellReference::new(1, 0),
            Err(Error::CoordinateOutOfRange { column: 1, row: 0 })
        );
        assert_eq!(
            CellReference::new(0, 1),
            Err(Error::CoordinateOutOfRange { column: 0, row: 1 })
        );
        assert_eq!(
            CellReference::new(1, MAX_ROW + 1),
            Err(Error::CoordinateOutOfRange {
                column: 1,
                row: 1_048_577
            })
        );
        assert_eq!(
            CellReference::new(MAX_COLUMN + 1, 1),
            Err(Error::CoordinateOutOfRange {
                column: 16_385,
                row: 1
            })
        );
    }

    #[test]
    fn test_with_column_letters() {
        let r = CellReference::with_column_letters("ab", 7).unwrap();
        assert_eq!(r.to_string(), "AB7");
        assert_eq!(
            CellReference::with_column_letters("", 7),
            Err(Error::MalformedColumn(String::new()))
        );
        assert!(matches!(
            CellReference::with_column_letters("XFE", 1),
            Err(Error::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse() {
        let r = cell("B12");
        assert_eq!(r.column_index(), 2);
        assert_eq!(r.row(), 12);
        assert!(!r.is_absolute_column());
        assert!(!r.is_absolute_row());

        let r = cell("a1");
        assert_eq!(r.to_string(), "A1");

        let r = cell("AA100");
        assert_eq!(r.column_index(), 27);
        assert_eq!(r.row(), 100);

        let r = cell("XFD1048576");
        assert_eq!(r.column_index(), MAX_COLUMN);
        assert_eq!(r.row(), MAX_ROW);
    }

    #[test]
    fn test_parse_anchors() {
        let r = cell("$B$12");
        assert!(r.is_absolute_column());
        assert!(r.is_absolute_row());
        assert!(r.is_absolute());

        let r = cell("$B12");
        assert!(r.is_absolute_column());
        assert!(!r.is_absolute_row());

        let r = cell("B$12");
        assert!(!r.is_absolute_column());
        assert!(r.is_absolute_row());
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "123", "A", "1A", "A1B", "$", "$$A1", "A$", "A-1", "A1$", "A 1", "$1"] {
            assert_eq!(
                CellReference::parse(input),
                Err(Error::MalformedReference(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(
            CellReference::parse("A0"),
            Err(Error::CoordinateOutOfRange { column: 1, row: 0 })
        );
        assert_eq!(
            CellReference::parse("A1048577"),
            Err(Error::CoordinateOutOfRange {
                column: 1,
                row: 1_048_577
            })
        );
        assert_eq!(
            CellReference::parse("XFE1"),
            Err(Error::CoordinateOutOfRange {
                column: 16_385,
                row: 1
            })
        );
        assert!(matches!(
            CellReference::parse("A99999999999999999999"),
            Err(Error::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        for input in ["B12", "$B$12", "$B12", "B$12", "XFD1048576", "$A$1"] {
            let r = cell(input);
            assert_eq!(r.to_string(), input);
            assert_eq!(cell(&r.to_string()), r);
        }
    }

    #[test]
    fn test_equality_includes_anchors() {
        assert_ne!(cell("A1"), cell("$A$1"));
        assert_ne!(cell("$A1"), cell("A$1"));
        assert!(cell("A1").same_cell(&cell("$A$1")));
        assert_eq!(cell("$A$1").to_relative(), cell("A1"));
    }

    #[test]
    fn test_ordering() {
        let b5 = CellReference::new(2, 5).unwrap();
        let a5 = CellReference::new(1, 5).unwrap();
        let a6 = CellReference::new(1, 6).unwrap();
        let cu5 = CellReference::new(99, 5).unwrap();

        assert!(b5 > a5);
        assert!(a6 > cu5);
        assert!(a5 < cu5);
        assert_eq!(a5.cmp_position(&a5.with_anchors(true, true)), Ordering::Equal);

        // Anchors never outweigh position
        assert!(cell("$B$5") > cell("A5"));
        assert!(cell("$Z$1") < cell("A2"));
    }

    #[test]
    fn test_ordering_is_consistent_with_eq() {
        let relative = cell("C3");
        let absolute = cell("$C$3");
        assert_ne!(relative.cmp(&absolute), Ordering::Equal);

        let set: BTreeSet<_> = ["C3", "$C$3", "C$3", "$C3", "A1"]
            .iter()
            .map(|s| cell(s))
            .collect();
        assert_eq!(set.len(), 5);
        assert_eq!(set.iter().next(), Some(&cell("A1")));
    }

    #[test]
    fn test_hash() {
        assert_eq!(reference_hash(cell("A1")), u64::from(MAX_COLUMN) + 1);
        assert_eq!(
            reference_hash(cell("C2")),
            2 * u64::from(MAX_COLUMN) + 3
        );
        assert_eq!(reference_hash(cell("A1")), reference_hash(cell("$A$1")));
        assert_eq!(hash_of(&cell("B7")), hash_of(&cell("B7")));
        assert_eq!(hash_of(&cell("B7")), hash_of(&cell("$B$7")));
        assert_ne!(reference_hash(cell("B7")), reference_hash(cell("C7")));
        // Row-major: the last cell of a row sorts before the first of the next
        assert!(reference_hash(cell("XFD1")) < reference_hash(cell("A2")));
    }

    #[test]
    fn test_hash_map_key() {
        let mut values = HashMap::new();
        values.insert(cell("A1"), "relative");
        values.insert(cell("$A$1"), "absolute");
        values.insert(cell("A1"), "replaced");

        assert_eq!(values.len(), 2);
        assert_eq!(values[&cell("A1")], "replaced");
        assert_eq!(values[&cell("$A$1")], "absolute");
    }

    #[test]
    fn test_make_absolute() {
        let mut r = cell("D4");
        r.make_absolute(true, false);
        assert_eq!(r.to_string(), "$D4");
        r.make_absolute(true, true);
        assert_eq!(r.to_string(), "$D$4");
        r.set_absolute_column(false);
        assert_eq!(r.to_string(), "D$4");
        r.set_absolute_row(false);
        assert_eq!(r, cell("D4"));
    }

    #[test]
    fn test_make_offset() {
        assert_eq!(cell("B2").make_offset(1, 1).unwrap(), cell("C3"));
        assert_eq!(cell("C3").make_offset(-2, -2).unwrap(), cell("A1"));
        assert_eq!(cell("$B$2").make_offset(0, 0).unwrap(), cell("B2"));

        assert_eq!(
            cell("A1").make_offset(-1, 0),
            Err(Error::CoordinateOutOfRange { column: 0, row: 1 })
        );
        assert_eq!(
            cell("A1").make_offset(0, -5),
            Err(Error::CoordinateOutOfRange { column: 1, row: -4 })
        );
        assert!(matches!(
            cell("XFD1048576").make_offset(i32::MAX, i32::MAX),
            Err(Error::CoordinateOutOfRange { .. })
        ));
        assert!(matches!(
            cell("A1").make_offset(i32::MIN, i32::MIN),
            Err(Error::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_to_range() {
        let r = cell("A1");
        let range = r.to_range();
        assert_eq!(range.top_left(), r);
        assert_eq!(range.bottom_right(), r);

        let range = cell("B2").to(cell("A1"));
        assert_eq!(range.top_left(), cell("B2"));
        assert_eq!(range.bottom_right(), cell("A1"));
    }
}
