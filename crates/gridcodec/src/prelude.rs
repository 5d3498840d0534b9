//! Prelude module - common imports for gridcodec users
//!
//! ```rust
//! use gridcodec::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellReference,
    // Data
    DataTable,
    // Extension traits
    DataTableExt,
    Decimal,
    // Error types
    Error,
    // I/O types
    ExportOptions,
    ImportOptions,
    Result,
    RowRecord,
    TypedValue,
    XlsxError,
    XlsxReader,
    XlsxWriter,
};
