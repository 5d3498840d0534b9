//! Sheet assembly and export entry points

use std::fs;
use std::io::Cursor;
use std::path::Path;

use gridcodec_core::{
    codec, sanitize_sheet_name, CellReference, DataTable, RawCell, Result, Row, StyleClass,
    StyleTable, TypedValue,
};

use crate::error::XlsxResult;
use crate::options::ExportOptions;
use crate::package::write_package;
use crate::styles::to_styles_xml;
use crate::xml::{encode_excel_escapes, escape_xml};

/// Width directive for one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDirective {
    /// 1-based column index
    pub index: u32,
    /// Width in characters
    pub width: f64,
}

/// The cell grid of an assembled sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledSheet {
    /// One directive per column
    pub columns: Vec<ColumnDirective>,
    /// Rows in ascending index order
    pub rows: Vec<Row>,
}

impl AssembledSheet {
    /// Find a row by its 1-based index
    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.iter().find(|r| r.index == index)
    }

    /// Serialize as a worksheet part
    pub fn to_worksheet_xml(&self) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !self.columns.is_empty() {
            content.push_str("\n    <cols>");
            for col in &self.columns {
                content.push_str(&format!(
                    "\n        <col min=\"{0}\" max=\"{0}\" width=\"{1}\" customWidth=\"1\"/>",
                    col.index, col.width
                ));
            }
            content.push_str("\n    </cols>");
        }

        content.push_str("\n    <sheetData>");
        for row in &self.rows {
            content.push_str(&format!("\n        <row r=\"{}\">", row.index));
            for cell in &row.cells {
                write_cell(&mut content, cell);
            }
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>\n</worksheet>");
        content
    }
}

fn write_cell(content: &mut String, cell: &RawCell) {
    content.push_str("\n            <c");
    if let Some(reference) = cell.reference {
        content.push_str(&format!(" r=\"{}\"", reference));
    }
    if cell.style_index != 0 {
        content.push_str(&format!(" s=\"{}\"", cell.style_index));
    }
    if let Some(t) = cell.type_tag.xlsx_type() {
        content.push_str(&format!(" t=\"{}\"", t));
    }

    if !cell.has_value() {
        content.push_str("/>");
        return;
    }

    content.push('>');
    if let Some(raw) = &cell.raw_text {
        content.push_str(&format!("<v>{}</v>", escape_xml(raw)));
    }
    if let Some(text) = &cell.inline_text {
        content.push_str(&format!(
            "<is><t xml:space=\"preserve\">{}</t></is>",
            escape_xml(&encode_excel_escapes(text))
        ));
    }
    content.push_str("</c>");
}

/// Assembly phases, in the only order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Columns,
    Header,
    Content,
    Footer,
    Done,
}

/// Lays a table out as a styled cell grid
///
/// Runs column directives, the header row (index 1), the content rows
/// (index 2 onward) and the optional footer, strictly in that order. With a
/// footer the last source row is written as the footer instead of as
/// content, and every footer cell is rendered as text.
pub struct SheetAssembler<'a> {
    table: &'a DataTable,
    styles: &'a StyleTable,
    options: &'a ExportOptions,
    phase: Phase,
    sheet: AssembledSheet,
}

impl<'a> SheetAssembler<'a> {
    /// Prepare to lay `table` out with the formats of `styles`
    pub fn new(table: &'a DataTable, styles: &'a StyleTable, options: &'a ExportOptions) -> Self {
        Self {
            table,
            styles,
            options,
            phase: Phase::Columns,
            sheet: AssembledSheet::default(),
        }
    }

    /// Run every phase and return the grid
    pub fn assemble(mut self) -> Result<AssembledSheet> {
        while self.step()? {}
        Ok(self.sheet)
    }

    /// Number of source rows written as content
    fn content_rows(&self) -> usize {
        if self.footer_row().is_some() {
            self.table.row_count() - 1
        } else {
            self.table.row_count()
        }
    }

    fn footer_row(&self) -> Option<&'a [TypedValue]> {
        let table: &'a DataTable = self.table;
        if self.options.with_footer {
            table.rows().last().map(Vec::as_slice)
        } else {
            None
        }
    }

    /// Run the current phase; false once everything is emitted
    fn step(&mut self) -> Result<bool> {
        self.phase = match self.phase {
            Phase::Columns => {
                self.emit_columns();
                Phase::Header
            }
            Phase::Header => {
                self.emit_header()?;
                Phase::Content
            }
            Phase::Content => {
                self.emit_content()?;
                Phase::Footer
            }
            Phase::Footer => {
                self.emit_footer()?;
                Phase::Done
            }
            Phase::Done => return Ok(false),
        };
        Ok(true)
    }

    fn emit_columns(&mut self) {
        let width = self.options.column_width;
        self.sheet.columns = (1..=self.table.column_count() as u32)
            .map(|index| ColumnDirective { index, width })
            .collect();
    }

    fn emit_header(&mut self) -> Result<()> {
        let table: &'a DataTable = self.table;
        let mut row = Row::new(1);
        for (col, name) in table.columns().iter().enumerate() {
            let value = TypedValue::text(name.as_str());
            row.push(self.place(&value, StyleClass::Header, col, 1)?);
        }
        self.sheet.rows.push(row);
        Ok(())
    }

    fn emit_content(&mut self) -> Result<()> {
        let table: &'a DataTable = self.table;
        for (i, values) in table.rows().iter().take(self.content_rows()).enumerate() {
            let index = i as u32 + 2;
            let mut row = Row::new(index);
            for (col, value) in values.iter().enumerate() {
                let class = if col == 0 {
                    StyleClass::ContentFirst
                } else {
                    StyleClass::ContentOther
                };
                row.push(self.place(value, class, col, index)?);
            }
            self.sheet.rows.push(row);
        }
        Ok(())
    }

    fn emit_footer(&mut self) -> Result<()> {
        let values = match self.footer_row() {
            Some(values) => values,
            None => return Ok(()),
        };

        let index = self.content_rows() as u32 + 2;
        let mut row = Row::new(index);
        for (col, value) in values.iter().enumerate() {
            let text = if value.is_null() {
                TypedValue::Null
            } else {
                TypedValue::Text(value.to_string())
            };
            row.push(self.place(&text, StyleClass::Footer, col, index)?);
        }
        self.sheet.rows.push(row);
        Ok(())
    }

    /// Encode a value and pin it to its grid position
    fn place(
        &self,
        value: &TypedValue,
        class: StyleClass,
        col: usize,
        row: u32,
    ) -> Result<RawCell> {
        let reference = CellReference::new(col as u32 + 1, row)?;
        Ok(codec::encode(value, class, self.styles).at(reference))
    }
}

/// XLSX export entry points
pub struct XlsxWriter;

impl XlsxWriter {
    /// Export a table as a single-sheet document
    ///
    /// The returned cursor is positioned at offset 0.
    pub fn export(
        table: &DataTable,
        sheet_name: &str,
        options: &ExportOptions,
    ) -> XlsxResult<Cursor<Vec<u8>>> {
        let styles = StyleTable::standard();
        let sheet = SheetAssembler::new(table, &styles, options).assemble()?;
        let name = sanitize_sheet_name(sheet_name);

        let mut cursor = write_package(
            Cursor::new(Vec::new()),
            &name,
            &to_styles_xml(&styles),
            &sheet.to_worksheet_xml(),
        )?;
        cursor.set_position(0);

        log::debug!(
            "exported sheet '{}': {} column(s), {} row(s), footer: {}",
            name,
            table.column_count(),
            sheet.rows.len(),
            options.with_footer
        );
        Ok(cursor)
    }

    /// Export a table to a file path
    pub fn export_file<P: AsRef<Path>>(
        table: &DataTable,
        path: P,
        sheet_name: &str,
        options: &ExportOptions,
    ) -> XlsxResult<()> {
        let cursor = Self::export(table, sheet_name, options)?;
        fs::write(path, cursor.into_inner())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcodec_core::{CellTypeTag, Decimal};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn name_age() -> DataTable {
        DataTable::new(["Name", "Age"])
            .with_row([TypedValue::text("Ann"), TypedValue::Integer(30)])
            .unwrap()
    }

    fn assemble(table: &DataTable, options: &ExportOptions) -> AssembledSheet {
        let styles = StyleTable::standard();
        SheetAssembler::new(table, &styles, options)
            .assemble()
            .unwrap()
    }

    fn texts(row: &Row) -> Vec<Option<&str>> {
        row.cells
            .iter()
            .map(|c| c.inline_text.as_deref().or(c.raw_text.as_deref()))
            .collect()
    }

    #[test]
    fn test_assemble_without_footer() {
        let sheet = assemble(&name_age(), &ExportOptions::default());

        assert_eq!(
            sheet.columns,
            vec![
                ColumnDirective { index: 1, width: 25.0 },
                ColumnDirective { index: 2, width: 25.0 },
            ]
        );
        assert_eq!(sheet.rows.len(), 2);

        let header = sheet.row(1).unwrap();
        assert_eq!(texts(header), vec![Some("Name"), Some("Age")]);
        assert!(header.cells.iter().all(|c| c.style_index == 10));

        let content = sheet.row(2).unwrap();
        assert_eq!(content.cells[0].type_tag, CellTypeTag::InlineString);
        assert_eq!(content.cells[0].inline_text.as_deref(), Some("Ann"));
        assert_eq!(content.cells[0].style_index, 8);
        assert_eq!(content.cells[1].type_tag, CellTypeTag::Number);
        assert_eq!(content.cells[1].raw_text.as_deref(), Some("30"));
        assert_eq!(content.cells[1].style_index, 11);
        assert_eq!(
            content.cells[1].reference,
            Some(CellReference::parse("B2").unwrap())
        );
    }

    #[test]
    fn test_assemble_with_footer() {
        let sheet = assemble(&name_age(), &ExportOptions::new().with_footer(true));

        assert_eq!(sheet.rows.len(), 2);
        let footer = sheet.row(2).unwrap();
        assert_eq!(texts(footer), vec![Some("Ann"), Some("30")]);
        assert!(footer
            .cells
            .iter()
            .all(|c| c.type_tag == CellTypeTag::InlineString && c.style_index == 12));
    }

    #[test]
    fn test_footer_follows_last_content_row() {
        let table = DataTable::new(["Item", "Total"])
            .with_row([TypedValue::text("a"), TypedValue::Integer(1)])
            .unwrap()
            .with_row([TypedValue::text("b"), TypedValue::Integer(2)])
            .unwrap()
            .with_row([TypedValue::text("sum"), TypedValue::Integer(3)])
            .unwrap();

        let sheet = assemble(&table, &ExportOptions::new().with_footer(true));
        let indices: Vec<u32> = sheet.rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(texts(sheet.row(4).unwrap()), vec![Some("sum"), Some("3")]);
        assert_eq!(sheet.row(3).unwrap().cells[1].style_index, 11);
    }

    #[test]
    fn test_footer_renders_decimal_and_bool_as_text() {
        let ratio = Decimal::from_str("12.50").unwrap();
        let table = DataTable::new(["Total", "Ratio", "Closed", "Note"])
            .with_row([
                TypedValue::Integer(-4),
                TypedValue::Decimal(ratio),
                TypedValue::Bool(true),
                TypedValue::Null,
            ])
            .unwrap();

        let sheet = assemble(&table, &ExportOptions::new().with_footer(true));
        let footer = sheet.row(2).unwrap();
        assert_eq!(
            texts(footer),
            vec![Some("-4"), Some("12.50"), Some("TRUE"), None]
        );
        assert!(footer.cells.iter().all(|c| c.style_index == 12));
        assert_eq!(footer.cells[2].type_tag, CellTypeTag::InlineString);
        assert!(!footer.cells[3].has_value());
    }

    #[test]
    fn test_control_characters_escaped() {
        let table = DataTable::new(["a\u{1}b"])
            .with_row(["_x0041_\r"])
            .unwrap();
        let xml = assemble(&table, &ExportOptions::default()).to_worksheet_xml();

        assert!(!xml.contains('\u{1}'));
        assert!(!xml.contains('\r'));
        assert!(xml.contains(r#"<t xml:space="preserve">a_x0001_b</t>"#));
        assert!(xml.contains(r#"<t xml:space="preserve">_x005F_x0041__x000D_</t>"#));
    }

    #[test]
    fn test_content_style_by_position() {
        let table = DataTable::new(["A", "B", "C"])
            .with_row(["x", "y", "z"])
            .unwrap();
        let sheet = assemble(&table, &ExportOptions::default());
        let styles: Vec<u32> = sheet.row(2).unwrap().cells.iter().map(|c| c.style_index).collect();
        assert_eq!(styles, vec![8, 13, 13]);
    }

    #[test]
    fn test_empty_sources() {
        let sheet = assemble(&DataTable::default(), &ExportOptions::new().with_footer(true));
        assert!(sheet.columns.is_empty());
        assert_eq!(sheet.rows.len(), 1);
        assert!(sheet.rows[0].is_empty());

        let header_only = assemble(&DataTable::new(["A"]), &ExportOptions::new().with_footer(true));
        assert_eq!(header_only.rows.len(), 1);
        assert_eq!(header_only.columns.len(), 1);
    }

    #[test]
    fn test_worksheet_xml() {
        let xml = assemble(&name_age(), &ExportOptions::default()).to_worksheet_xml();

        assert!(xml.contains(r#"<col min="1" max="1" width="25" customWidth="1"/>"#));
        assert!(xml.contains(r#"<col min="2" max="2" width="25" customWidth="1"/>"#));
        assert!(xml.contains(
            r#"<c r="A1" s="10" t="inlineStr"><is><t xml:space="preserve">Name</t></is></c>"#
        ));
        assert!(xml.contains(r#"<c r="B2" s="11"><v>30</v></c>"#));
    }

    #[test]
    fn test_null_and_escaped_cells() {
        let table = DataTable::new(["<k>"])
            .with_row([TypedValue::Null])
            .unwrap();
        let xml = assemble(&table, &ExportOptions::default()).to_worksheet_xml();
        assert!(xml.contains("&lt;k&gt;"));
        assert!(xml.contains(r#"<c r="A2" s="8"/>"#));
    }

    #[test]
    fn test_export_cursor_at_start() {
        let cursor = XlsxWriter::export(&name_age(), "People", &ExportOptions::default()).unwrap();
        assert_eq!(cursor.position(), 0);
        assert!(cursor.get_ref().starts_with(b"PK"));
    }
}
