//! Error types for cellref-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or parsing references
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Text does not follow the `[$]letters[$]digits` grammar
    #[error("Malformed cell reference: '{0}'")]
    MalformedReference(String),

    /// Column letters are empty or contain a non-letter
    #[error("Malformed column name: '{0}'")]
    MalformedColumn(String),

    /// Column index outside `1..=MAX_COLUMN`
    #[error("Column index {0} out of range (1..={max})", max = crate::MAX_COLUMN)]
    ColumnOutOfRange(i64),

    /// Coordinate outside the grid
    #[error(
        "Cell coordinate (column {column}, row {row}) out of range (max column {max_col}, max row {max_row})",
        max_col = crate::MAX_COLUMN,
        max_row = crate::MAX_ROW
    )]
    CoordinateOutOfRange {
        /// Offending column index (1-based)
        column: i64,
        /// Offending row number (1-based)
        row: i64,
    },

    /// Range text does not follow the `ref[:ref]` grammar
    #[error("Malformed range reference: '{0}'")]
    MalformedRange(String),
}

impl Error {
    pub(crate) fn out_of_range(column: impl Into<i64>, row: impl Into<i64>) -> Self {
        Error::CoordinateOutOfRange {
            column: column.into(),
            row: row.into(),
        }
    }

    /// Returns true for errors caused by bad syntax rather than bad bounds
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::MalformedReference(_) | Error::MalformedColumn(_) | Error::MalformedRange(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::MalformedReference("1A".into()).to_string(),
            "Malformed cell reference: '1A'"
        );
        assert_eq!(
            Error::out_of_range(0, 5u32).to_string(),
            "Cell coordinate (column 0, row 5) out of range (max column 16384, max row 1048576)"
        );
        assert_eq!(
            Error::ColumnOutOfRange(16385).to_string(),
            "Column index 16385 out of range (1..=16384)"
        );
    }

    #[test]
    fn test_is_malformed() {
        assert!(Error::MalformedColumn(String::new()).is_malformed());
        assert!(Error::MalformedRange("A1:".into()).is_malformed());
        assert!(!Error::ColumnOutOfRange(0).is_malformed());
        assert!(!Error::out_of_range(1, 0).is_malformed());
    }
}
