//! XLSX error types

use gridcodec_core::Error;
use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX import/export
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The stream is not a spreadsheet package
    #[error("Failed to open document: {0}")]
    DocumentOpenFailed(String),

    /// A new package could not be produced
    #[error("Failed to create document: {0}")]
    DocumentCreationFailed(String),

    /// Core error (bad reference, corrupt content, unsupported cell type...)
    #[error(transparent)]
    Core(#[from] Error),
}

impl XlsxError {
    pub(crate) fn corrupt<S: Into<String>>(msg: S) -> Self {
        XlsxError::Core(Error::corrupt(msg))
    }

    /// Whether the requested sheet does not exist
    pub fn is_sheet_not_found(&self) -> bool {
        matches!(self, XlsxError::Core(Error::SheetNotFound(_)))
    }

    /// Whether the document contradicts itself
    pub fn is_corrupt(&self) -> bool {
        matches!(self, XlsxError::Core(Error::CorruptDocument(_)))
    }
}
