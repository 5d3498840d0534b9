//! Import and export options

/// Options for dictionary-style import
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Return row 1 as an ordinary record instead of skipping it
    pub include_header: bool,
}

impl ImportOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether row 1 is returned
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// First row index returned by the import
    pub(crate) fn first_row(&self) -> u32 {
        if self.include_header {
            1
        } else {
            2
        }
    }
}

/// Options for export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Write the last source row as a footer row
    pub with_footer: bool,
    /// Width of every column, in characters
    pub column_width: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            with_footer: false,
            column_width: 25.0,
        }
    }
}

impl ExportOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a footer row is written
    pub fn with_footer(mut self, footer: bool) -> Self {
        self.with_footer = footer;
        self
    }

    /// Set the column width
    pub fn column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }
}
