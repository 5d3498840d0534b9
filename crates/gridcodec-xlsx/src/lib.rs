//! # gridcodec-xlsx
//!
//! XLSX (Office Open XML) import and export for gridcodec.
//!
//! ```rust
//! use gridcodec_core::{DataTable, TypedValue};
//! use gridcodec_xlsx::{ExportOptions, ImportOptions, XlsxReader, XlsxWriter};
//!
//! let table = DataTable::new(["Name", "Age"])
//!     .with_row([TypedValue::from("Ann"), TypedValue::from(30)])
//!     .unwrap();
//!
//! let cursor = XlsxWriter::export(&table, "People", &ExportOptions::default()).unwrap();
//! let records = XlsxReader::import_records(cursor, "People", &ImportOptions::default()).unwrap();
//!
//! assert_eq!(records[0].get("A"), Some(&TypedValue::from("Ann")));
//! ```

pub mod error;
pub mod options;
pub mod package;
pub mod reader;
pub mod styles;
pub mod writer;

mod xml;

pub use error::{XlsxError, XlsxResult};
pub use options::{ExportOptions, ImportOptions};
pub use package::XlsxDocument;
pub use reader::{SheetScanner, XlsxReader};
pub use styles::to_styles_xml;
pub use writer::{AssembledSheet, ColumnDirective, SheetAssembler, XlsxWriter};
