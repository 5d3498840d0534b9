//! Error types for gridcodec-core

use thiserror::Error;

use crate::cell::CellTypeTag;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing, decoding or tabulating cells
///
/// Every variant is terminal for the operation that raised it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell reference string (e.g. "1A", "A", "A1B")
    #[error("Malformed cell reference: {0}")]
    MalformedReference(String),

    /// The document contradicts itself (shared string index out of range,
    /// dangling part relationship, unknown cell type...)
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    /// A cell type the codec deliberately does not decode
    #[error("Unsupported cell type: {0}")]
    UnsupportedCellType(CellTypeTag),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A row does not fit the table it is added to
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

impl Error {
    /// Create a corrupt-document error with a message
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Error::CorruptDocument(msg.into())
    }
}
