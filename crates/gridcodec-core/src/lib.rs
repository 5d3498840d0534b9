//! # gridcodec-core
//!
//! Core data structures for the gridcodec spreadsheet codec.
//!
//! This crate provides the format-independent pieces:
//! - [`CellReference`] - A1-style cell addressing
//! - [`TypedValue`] and [`RawCell`] - Cell values before and after decoding
//! - [`codec`] - Conversion between the two
//! - [`StyleTable`] - The style catalog written with every export
//! - [`DataTable`] and [`RowRecord`] - Tabular data exchanged with callers
//!
//! ## Example
//!
//! ```rust
//! use gridcodec_core::{codec, SharedStringTable, StyleClass, StyleTable, TypedValue};
//!
//! let styles = StyleTable::standard();
//! let cell = codec::encode(&TypedValue::from("Ann"), StyleClass::ContentFirst, &styles);
//!
//! let value = codec::decode(&cell, &SharedStringTable::new()).unwrap();
//! assert_eq!(value, TypedValue::from("Ann"));
//! ```

pub mod cell;
pub mod codec;
pub mod data;
pub mod error;
pub mod style;

// Re-exports for convenience
pub use cell::{
    column_index, column_letters, CellReference, CellTypeTag, RawCell, Row, SharedStringTable,
    TypedValue,
};
pub use codec::StyleClass;
pub use data::{DataTable, RowRecord};
pub use error::{Error, Result};
pub use style::{CellFormat, StyleRole, StyleTable, StyleTableBuilder};

/// Re-export of the decimal type carried by [`TypedValue::Decimal`]
pub use rust_decimal::Decimal;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Widest header a table import accepts (column `XFD`)
///
/// Cell addressing itself has no ceiling; only table import, which lays
/// every header column out densely, enforces this one.
pub const MAX_TABLE_COLUMNS: u32 = 16384;

/// Name used when a sheet name sanitizes to nothing
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Make a caller-supplied name usable as a sheet name
///
/// Control characters are dropped, `/` becomes `|`, the result is cut to
/// [`MAX_SHEET_NAME_LEN`] characters, and an empty name becomes
/// [`DEFAULT_SHEET_NAME`].
pub fn sanitize_sheet_name(name: &str) -> String {
    let name: String = name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '/' { '|' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    if name.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Sales/2024"), "Sales|2024");
        assert_eq!(sanitize_sheet_name(""), "Sheet1");
        assert_eq!(sanitize_sheet_name("Data"), "Data");
        assert_eq!(sanitize_sheet_name("Da\u{1}ta\r"), "Data");
        assert_eq!(sanitize_sheet_name("\u{0}\u{1f}"), "Sheet1");

        let long = "x".repeat(40);
        assert_eq!(sanitize_sheet_name(&long).chars().count(), 31);

        let accented = "é".repeat(40);
        assert_eq!(sanitize_sheet_name(&accented), "é".repeat(31));
    }
}
