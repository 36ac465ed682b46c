//! # cellref-core
//!
//! A1-style cell and range addressing for spreadsheets.
//!
//! This crate provides the coordinate types other spreadsheet layers key on:
//! - [`ColumnIndex`] - A bounded column number and its letter name
//! - [`CellReference`] - A validated (column, row) pair with `$` anchors
//! - [`RangeReference`] - A rectangular block described by two corners
//!
//! All types are small `Copy` values. Parsing and construction return
//! [`Result`]; nothing is validated lazily.
//!
//! ## Example
//!
//! ```rust
//! use cellref_core::{CellReference, RangeReference};
//!
//! let cell: CellReference = "b2".parse().unwrap();
//! assert_eq!(cell.to_string(), "B2");
//!
//! let next = cell.make_offset(1, 1).unwrap();
//! assert_eq!(next.to_string(), "C3");
//!
//! let filter = RangeReference::new(cell, next).to_absolute();
//! assert_eq!(filter.to_string(), "$B$2:$C$3");
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod range;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-exports for convenience
pub use cell::{reference_hash, CellReference};
pub use column::{column_index_from_letters, column_letters, ColumnIndex};
pub use error::{Error, Result};
pub use range::{RangeCells, RangeReference};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROW: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLUMN: u32 = 16_384;
