//! Number format types

/// First id available to custom number formats (ids below are built in)
pub const FIRST_CUSTOM_NUMBER_FORMAT_ID: u32 = 164;

/// Built-in number format ids referenced by the catalog
pub struct BuiltinFormat;

impl BuiltinFormat {
    /// 0 - General
    pub const GENERAL: u32 = 0;
    /// 4 - #,##0.00
    pub const THOUSANDS_DEC2: u32 = 4;
    /// 14 - short date
    pub const DATE_SHORT: u32 = 14;
}

/// A custom number format registered in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    /// Format id (>= 164)
    pub id: u32,
    /// Format code (e.g. "#,##0.00")
    pub code: String,
}

impl NumberFormat {
    /// Create a custom number format
    pub fn new<S: Into<String>>(id: u32, code: S) -> Self {
        Self {
            id,
            code: code.into(),
        }
    }
}
