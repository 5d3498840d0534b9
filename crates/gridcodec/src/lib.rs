//! # gridcodec
//!
//! A typed codec between tabular data and XLSX spreadsheets.
//!
//! ## Features
//!
//! - Export a [`DataTable`] as a styled single-sheet workbook, with an
//!   optional footer row
//! - Import a sheet as a [`DataTable`] or as one [`RowRecord`] per row
//! - A1-style cell addressing and an explicit, caller-declared value typing
//!
//! ## Example
//!
//! ```rust
//! use gridcodec::prelude::*;
//!
//! let table = DataTable::new(["Name", "Age"])
//!     .with_row([TypedValue::from("Ann"), TypedValue::from(30)])
//!     .unwrap();
//!
//! // Export to an in-memory document
//! let cursor = XlsxWriter::export(&table, "People", &ExportOptions::default()).unwrap();
//!
//! // Read it back
//! let imported = XlsxReader::import_table(cursor, "People").unwrap();
//! assert_eq!(imported.columns(), ["Name", "Age"]);
//!
//! // Save to file
//! // table.save_xlsx("people.xlsx", "People").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use gridcodec_core::{
    codec,
    column_index,
    column_letters,
    sanitize_sheet_name,
    // Cell types
    CellReference,
    CellTypeTag,
    // Data
    DataTable,
    Decimal,
    // Error types
    Error,
    RawCell,
    Result,
    Row,
    RowRecord,
    SharedStringTable,
    // Styles
    StyleClass,
    StyleRole,
    StyleTable,
    StyleTableBuilder,
    TypedValue,
    // Constants
    DEFAULT_SHEET_NAME,
    MAX_SHEET_NAME_LEN,
    MAX_TABLE_COLUMNS,
};

// Re-export I/O types
pub use gridcodec_xlsx::{
    ExportOptions, ImportOptions, SheetAssembler, SheetScanner, XlsxDocument, XlsxError,
    XlsxReader, XlsxResult, XlsxWriter,
};

use std::path::Path;

/// Extension trait for [`DataTable`] to add file I/O
pub trait DataTableExt: Sized {
    /// Open a sheet of an XLSX file as a table
    fn open_xlsx<P: AsRef<Path>>(path: P, sheet: &str) -> XlsxResult<Self>;

    /// Save the table to an XLSX file with default options
    fn save_xlsx<P: AsRef<Path>>(&self, path: P, sheet: &str) -> XlsxResult<()>;

    /// Encode the table as XLSX bytes
    fn to_xlsx_bytes(&self, sheet: &str, options: &ExportOptions) -> XlsxResult<Vec<u8>>;
}

impl DataTableExt for DataTable {
    fn open_xlsx<P: AsRef<Path>>(path: P, sheet: &str) -> XlsxResult<DataTable> {
        XlsxReader::import_table_file(path, sheet)
    }

    fn save_xlsx<P: AsRef<Path>>(&self, path: P, sheet: &str) -> XlsxResult<()> {
        XlsxWriter::export_file(self, path, sheet, &ExportOptions::default())
    }

    fn to_xlsx_bytes(&self, sheet: &str, options: &ExportOptions) -> XlsxResult<Vec<u8>> {
        Ok(XlsxWriter::export(self, sheet, options)?.into_inner())
    }
}
