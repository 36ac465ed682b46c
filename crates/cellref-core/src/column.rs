//! Column identifiers

use crate::error::{Error, Result};
use crate::MAX_COLUMN;
use std::fmt;
use std::str::FromStr;

/// A 1-based column index (A = 1, Z = 26, AA = 27, ..., XFD = 16384)
///
/// The index is always within `1..=MAX_COLUMN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex(u32);

impl ColumnIndex {
    /// Column A
    pub const MIN: ColumnIndex = ColumnIndex(1);

    /// Column XFD
    pub const MAX: ColumnIndex = ColumnIndex(MAX_COLUMN);

    /// Create a column from its 1-based index
    pub fn new(index: u32) -> Result<Self> {
        if index == 0 || index > MAX_COLUMN {
            return Err(Error::ColumnOutOfRange(index.into()));
        }
        Ok(Self(index))
    }

    /// Resolve a column from its letters (case-insensitive)
    ///
    /// # Examples
    /// ```
    /// use cellref_core::ColumnIndex;
    ///
    /// assert_eq!(ColumnIndex::from_letters("A").unwrap().index(), 1);
    /// assert_eq!(ColumnIndex::from_letters("aa").unwrap().index(), 27);
    /// assert!(ColumnIndex::from_letters("A1").is_err());
    /// ```
    pub fn from_letters(letters: &str) -> Result<Self> {
        let index = column_index_from_letters(letters)?;
        Self::new(index)
    }

    /// The 1-based index
    pub fn index(self) -> u32 {
        self.0
    }

    /// Column letters ("A", "AB", "XFD")
    pub fn to_letters(self) -> String {
        column_letters(self.0)
    }

    /// Shift by a signed number of columns
    pub fn offset(self, delta: i32) -> Result<Self> {
        let shifted = i64::from(self.0) + i64::from(delta);
        u32::try_from(shifted)
            .map_err(|_| Error::ColumnOutOfRange(shifted))
            .and_then(Self::new)
    }
}

impl Default for ColumnIndex {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_letters())
    }
}

impl FromStr for ColumnIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_letters(s)
    }
}

impl TryFrom<u32> for ColumnIndex {
    type Error = Error;

    fn try_from(index: u32) -> Result<Self> {
        Self::new(index)
    }
}

impl From<ColumnIndex> for u32 {
    fn from(column: ColumnIndex) -> Self {
        column.0
    }
}

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
///
/// Returns an empty string for 0.
pub fn column_letters(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index;

    while n > 0 {
        n -= 1;
        letters.push(((n % 26) as u8 + b'A') as char);
        n /= 26;
    }

    letters.iter().rev().collect()
}

/// Convert column letters to a 1-based index without bounds checking
///
/// Very long names saturate at `u32::MAX` so that callers can still report
/// them as out of range.
pub fn column_index_from_letters(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::MalformedColumn(letters.to_string()));
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::MalformedColumn(letters.to_string()));
        }
        let digit = u32::from(c.to_ascii_uppercase() as u8 - b'A' + 1);
        index = index.saturating_mul(26).saturating_add(digit);
    }

    Ok(index)
}
