//! The append-only style catalog

use ahash::AHashMap;

use super::{
    Alignment, Border, BorderLineStyle, BuiltinFormat, CellFormat, Color, Fill, Font,
    HorizontalAlignment, NumberFormat, StyleRole, VerticalAlignment,
    FIRST_CUSTOM_NUMBER_FORMAT_ID,
};

/// An ordered catalog of number formats, fonts, fills, borders and cell formats
///
/// Indices are assigned in insertion order and never change. A table is
/// built fresh for every write session; see [`StyleTableBuilder`].
#[derive(Debug, Clone)]
pub struct StyleTable {
    number_formats: Vec<NumberFormat>,
    fonts: Vec<Font>,
    fills: Vec<Fill>,
    borders: Vec<Border>,
    cell_formats: Vec<CellFormat>,
    roles: AHashMap<StyleRole, u32>,
}

impl StyleTable {
    /// The standard catalog used for exports
    pub fn standard() -> Self {
        Self::standard_builder().build()
    }

    /// A builder pre-loaded with the standard catalog
    ///
    /// Entries appended to it land after the standard ones, so every
    /// standard index stays valid.
    pub fn standard_builder() -> StyleTableBuilder {
        let mut b = StyleTableBuilder::new();

        let date_time = b.add_number_format("dd/mm/yyyy hh:mm:ss");
        let four_decimals = b.add_number_format("#,##0.0000");
        let two_decimals = b.add_number_format("#,##0.00");
        let text = b.add_number_format("@");
        let integer = b.add_number_format("#");

        b.add_font(Font::new());
        let bold = b.add_font(Font::new().with_bold(true));

        let green = b.add_fill(Fill::solid(Color::rgb(0x01, 0xDF, 0x3A)));
        let white = b.add_fill(Fill::solid(Color::WHITE));

        b.add_border(Border::new());
        let thin = b.add_border(Border::all(BorderLineStyle::Thin));
        b.add_border(Border::horizontal(BorderLineStyle::Thin));

        let left_center = Alignment::new(HorizontalAlignment::Left, VerticalAlignment::Center);

        b.add_role(StyleRole::Default, CellFormat::default());
        b.add_role(StyleRole::ShortDate, CellFormat::new(BuiltinFormat::DATE_SHORT));
        b.add_role(StyleRole::Thousands, CellFormat::new(BuiltinFormat::THOUSANDS_DEC2));
        b.add_role(StyleRole::DateTime, CellFormat::new(date_time));
        b.add_role(StyleRole::FourDecimals, CellFormat::new(four_decimals));
        b.add_role(StyleRole::TwoDecimals, CellFormat::new(two_decimals));
        b.add_role(StyleRole::ForcedText, CellFormat::new(text));
        b.add_role(StyleRole::BoldText, CellFormat::new(text).font(bold));
        b.add_role(StyleRole::BorderedText, CellFormat::new(text).border(thin));
        b.add_role(StyleRole::BorderedDecimal, CellFormat::new(two_decimals).border(thin));
        b.add_role(
            StyleRole::HeaderText,
            CellFormat::new(text).font(bold).fill(green).border(thin),
        );
        b.add_role(StyleRole::BorderedInteger, CellFormat::new(integer).border(thin));
        b.add_role(
            StyleRole::FooterText,
            CellFormat::new(text)
                .font(bold)
                .fill(white)
                .border(thin)
                .aligned(left_center),
        );
        b.add_role(
            StyleRole::AlignedText,
            CellFormat::new(text).border(thin).aligned(left_center),
        );

        b
    }

    /// Index of the cell format registered for a role
    pub fn index_of(&self, role: StyleRole) -> Option<u32> {
        self.roles.get(&role).copied()
    }

    /// Custom number formats, in id order
    pub fn number_formats(&self) -> &[NumberFormat] {
        &self.number_formats
    }

    /// Fonts, in index order
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    /// Fills, in index order
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Borders, in index order
    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// Composite cell formats, in index order
    pub fn cell_formats(&self) -> &[CellFormat] {
        &self.cell_formats
    }

    /// Get a cell format by index
    pub fn cell_format(&self, index: u32) -> Option<&CellFormat> {
        self.cell_formats.get(index as usize)
    }
}

/// Builds a [`StyleTable`] by appending entries
///
/// Every `add_*` call returns the index (or number format id) the entry
/// will have in the finished table.
#[derive(Debug, Clone)]
pub struct StyleTableBuilder {
    table: StyleTable,
}

impl Default for StyleTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleTableBuilder {
    /// Create a builder holding only the two fills every document reserves
    /// (`none` and `gray125`)
    pub fn new() -> Self {
        Self {
            table: StyleTable {
                number_formats: Vec::new(),
                fonts: Vec::new(),
                fills: vec![Fill::None, Fill::Gray125],
                borders: Vec::new(),
                cell_formats: Vec::new(),
                roles: AHashMap::new(),
            },
        }
    }

    /// Append a custom number format and return its id (starting at 164)
    pub fn add_number_format<S: Into<String>>(&mut self, code: S) -> u32 {
        let id = FIRST_CUSTOM_NUMBER_FORMAT_ID + self.table.number_formats.len() as u32;
        self.table.number_formats.push(NumberFormat::new(id, code));
        id
    }

    /// Append a font and return its index
    pub fn add_font(&mut self, font: Font) -> u32 {
        self.table.fonts.push(font);
        self.table.fonts.len() as u32 - 1
    }

    /// Append a fill and return its index
    pub fn add_fill(&mut self, fill: Fill) -> u32 {
        self.table.fills.push(fill);
        self.table.fills.len() as u32 - 1
    }

    /// Append a border and return its index
    pub fn add_border(&mut self, border: Border) -> u32 {
        self.table.borders.push(border);
        self.table.borders.len() as u32 - 1
    }

    /// Append a cell format and return its index
    pub fn add_cell_format(&mut self, format: CellFormat) -> u32 {
        self.table.cell_formats.push(format);
        self.table.cell_formats.len() as u32 - 1
    }

    /// Append a cell format and name it with a role
    ///
    /// A role that is already named keeps its first index.
    pub fn add_role(&mut self, role: StyleRole, format: CellFormat) -> u32 {
        let index = self.add_cell_format(format);
        self.table.roles.entry(role).or_insert(index);
        index
    }

    /// Finish the catalog
    pub fn build(self) -> StyleTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_role_indices() {
        let table = StyleTable::standard();
        for (i, role) in StyleRole::ALL.iter().enumerate() {
            assert_eq!(table.index_of(*role), Some(i as u32), "{:?}", role);
        }
        assert_eq!(table.cell_formats().len(), 14);
    }

    #[test]
    fn test_standard_catalog_contents() {
        let table = StyleTable::standard();

        let codes: Vec<(u32, &str)> = table
            .number_formats()
            .iter()
            .map(|f| (f.id, f.code.as_str()))
            .collect();
        assert_eq!(
            codes,
            vec![
                (164, "dd/mm/yyyy hh:mm:ss"),
                (165, "#,##0.0000"),
                (166, "#,##0.00"),
                (167, "@"),
                (168, "#"),
            ]
        );

        assert_eq!(table.fonts().len(), 2);
        assert!(table.fonts()[1].bold);
        assert_eq!(table.fills()[0], Fill::None);
        assert_eq!(table.fills()[1], Fill::Gray125);
        assert_eq!(table.fills()[2], Fill::Solid(Color::rgb(0x01, 0xDF, 0x3A)));
        assert_eq!(table.borders().len(), 3);

        let header = table.cell_format(10).unwrap();
        assert_eq!(
            (header.number_format_id, header.font_id, header.fill_id, header.border_id),
            (167, 1, 2, 1)
        );
        assert_eq!(table.cell_format(9).unwrap().number_format_id, 166);
        assert_eq!(table.cell_format(11).unwrap().number_format_id, 168);
        assert!(table.cell_format(12).unwrap().alignment.is_some());
        assert!(table.cell_format(8).unwrap().alignment.is_none());
        assert!(!table.cell_format(0).unwrap().applies_number_format());
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = StyleTable::standard();
        let b = StyleTable::standard();
        assert_eq!(a.cell_formats(), b.cell_formats());
        assert_eq!(a.number_formats(), b.number_formats());
    }

    #[test]
    fn test_appending_keeps_existing_indices() {
        let mut builder = StyleTable::standard_builder();
        let id = builder.add_number_format("0.0%");
        let index = builder.add_cell_format(CellFormat::new(id).border(1));
        let table = builder.build();

        assert_eq!(id, 169);
        assert_eq!(index, 14);
        assert_eq!(table.index_of(StyleRole::HeaderText), Some(10));
        assert_eq!(table.index_of(StyleRole::FooterText), Some(12));
    }

    #[test]
    fn test_empty_builder() {
        let table = StyleTableBuilder::new().build();
        assert_eq!(table.fills().len(), 2);
        assert!(table.cell_formats().is_empty());
        assert_eq!(table.index_of(StyleRole::HeaderText), None);
    }
}
