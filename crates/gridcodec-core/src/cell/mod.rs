//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellReference`] - A cell's location (e.g., "AB12")
//! - [`TypedValue`] - The decoded value of a cell
//! - [`RawCell`] and [`Row`] - Cells as stored in the grid
//! - [`SharedStringTable`] - The document's string pool

mod address;
mod raw;
mod shared;
mod value;

pub use address::{column_index, column_letters, CellReference};
pub use raw::{CellTypeTag, RawCell, Row};
pub use shared::SharedStringTable;
pub use value::TypedValue;
