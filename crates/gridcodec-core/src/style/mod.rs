//! Cell styling types
//!
//! This module contains the pieces of the style catalog written to a
//! document:
//! - [`NumberFormat`] - Custom number format codes
//! - [`Font`] - Font settings
//! - [`Fill`] - Background fill
//! - [`Border`] - Cell borders
//! - [`Alignment`] - Text alignment
//! - [`CellFormat`] - A composite format combining the above by index
//!
//! [`StyleTable`] holds the ordered catalog and resolves [`StyleRole`]s to
//! stable indices.

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod table;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{Border, BorderLineStyle};
pub use color::Color;
pub use fill::Fill;
pub use font::Font;
pub use number_format::{BuiltinFormat, NumberFormat, FIRST_CUSTOM_NUMBER_FORMAT_ID};
pub use table::{StyleTable, StyleTableBuilder};

/// A composite cell format (an entry of `cellXfs`)
///
/// Each field is an index (or id, for number formats) into the matching
/// section of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellFormat {
    /// Number format id (built-in or custom)
    pub number_format_id: u32,
    /// Index into the font list
    pub font_id: u32,
    /// Index into the fill list
    pub fill_id: u32,
    /// Index into the border list
    pub border_id: u32,
    /// Explicit alignment, if any
    pub alignment: Option<Alignment>,
}

impl CellFormat {
    /// Create a format using the given number format and default everything else
    pub fn new(number_format_id: u32) -> Self {
        Self {
            number_format_id,
            ..Self::default()
        }
    }

    /// Set font index
    pub fn font(mut self, font_id: u32) -> Self {
        self.font_id = font_id;
        self
    }

    /// Set fill index
    pub fn fill(mut self, fill_id: u32) -> Self {
        self.fill_id = fill_id;
        self
    }

    /// Set border index
    pub fn border(mut self, border_id: u32) -> Self {
        self.border_id = border_id;
        self
    }

    /// Set alignment
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Whether the number format is applied explicitly
    pub fn applies_number_format(&self) -> bool {
        self.number_format_id != BuiltinFormat::GENERAL
    }
}

/// Named entries of the standard catalog
///
/// Each role maps to one fixed cell format index in [`StyleTable::standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRole {
    /// 0 - default format
    Default,
    /// 1 - short date
    ShortDate,
    /// 2 - `#,##0.00` (built-in)
    Thousands,
    /// 3 - date and time
    DateTime,
    /// 4 - four decimals
    FourDecimals,
    /// 5 - two decimals
    TwoDecimals,
    /// 6 - text
    ForcedText,
    /// 7 - bold text
    BoldText,
    /// 8 - bordered text
    BorderedText,
    /// 9 - bordered two-decimal number
    BorderedDecimal,
    /// 10 - header text (bold, green fill, bordered)
    HeaderText,
    /// 11 - bordered whole number
    BorderedInteger,
    /// 12 - footer text (bold, white fill, bordered, aligned)
    FooterText,
    /// 13 - aligned bordered text
    AlignedText,
}

impl StyleRole {
    /// All roles in catalog order
    pub const ALL: [StyleRole; 14] = [
        StyleRole::Default,
        StyleRole::ShortDate,
        StyleRole::Thousands,
        StyleRole::DateTime,
        StyleRole::FourDecimals,
        StyleRole::TwoDecimals,
        StyleRole::ForcedText,
        StyleRole::BoldText,
        StyleRole::BorderedText,
        StyleRole::BorderedDecimal,
        StyleRole::HeaderText,
        StyleRole::BorderedInteger,
        StyleRole::FooterText,
        StyleRole::AlignedText,
    ];
}
