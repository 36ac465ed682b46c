//! Cell-related types
//!
//! This module contains:
//! - [`CellReference`] - A cell's location (e.g., "A1", "$B$2")
//! - [`reference_hash`] - The row-major key used when references index storage

mod reference;

pub use reference::{reference_hash, CellReference};
