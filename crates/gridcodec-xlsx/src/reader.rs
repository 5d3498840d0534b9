//! Sheet scanning and import entry points

use std::io::{BufRead, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use gridcodec_core::{
    codec, column_index, column_letters, CellReference, CellTypeTag, DataTable, Error, RawCell,
    Row, RowRecord, SharedStringTable, TypedValue, MAX_TABLE_COLUMNS,
};

use crate::error::{XlsxError, XlsxResult};
use crate::options::ImportOptions;
use crate::package::XlsxDocument;
use crate::xml::{attr_value, decode_excel_escapes};

/// The parsed cell grid of one worksheet
///
/// Rows are kept in document order; lookups by index or reference return
/// `None` for anything the sheet does not contain.
#[derive(Debug, Clone)]
pub struct SheetScanner {
    name: String,
    rows: Vec<Row>,
}

impl SheetScanner {
    /// Parse a worksheet part
    pub fn parse<B: BufRead>(name: &str, reader: B) -> XlsxResult<Self> {
        let rows = read_sheet_data(reader)?;
        log::debug!("scanned sheet '{}': {} row(s)", name, rows.len());
        Ok(Self {
            name: name.to_string(),
            rows,
        })
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows in document order
    pub fn rows(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows present in the sheet
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a row by its 1-based index
    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.iter().find(|r| r.index == index)
    }

    /// Find a cell by reference
    pub fn cell(&self, reference: &CellReference) -> Option<&RawCell> {
        self.row(reference.row())?.cell(reference.column())
    }

    /// Find a cell by column letters and row index
    pub fn cell_at(&self, letters: &str, row: u32) -> Option<&RawCell> {
        let column = column_index(letters).ok()?;
        self.row(row)?.cell(column)
    }

    /// Decode one row into a record keyed by column letters
    pub fn row_record(
        &self,
        index: u32,
        strings: &SharedStringTable,
    ) -> gridcodec_core::Result<Option<RowRecord>> {
        self.row(index)
            .map(|row| decode_record(row, strings))
            .transpose()
    }

    /// Whether any row after `row_index` holds a cell with a value
    pub fn data_exists_after(&self, row_index: u32) -> bool {
        self.rows
            .iter()
            .filter(|r| r.index > row_index)
            .any(|r| r.cells.iter().any(RawCell::has_value))
    }
}

/// Pair each cell with its 1-based column
///
/// Cells without a reference sit one column after the previous cell.
fn placed_cells(row: &Row) -> impl Iterator<Item = (u32, &RawCell)> {
    row.cells.iter().scan(0u32, |last, cell| {
        let column = cell
            .reference
            .map_or_else(|| last.saturating_add(1), |r| r.column());
        *last = column;
        Some((column, cell))
    })
}

fn decode_record(row: &Row, strings: &SharedStringTable) -> gridcodec_core::Result<RowRecord> {
    let mut record = RowRecord::new(row.index);
    for (column, cell) in placed_cells(row) {
        record.insert(column_letters(column), codec::decode(cell, strings)?);
    }
    Ok(record)
}

/// Read the `<sheetData>` of a worksheet part
fn read_sheet_data<B: BufRead>(reader: B) -> XlsxResult<Vec<Row>> {
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut rows = Vec::new();
    let mut last_index = 0u32;

    let mut current_row: Option<Row> = None;
    let mut current_cell: Option<RawCell> = None;
    let mut in_value = false;
    let mut in_inline_str = false;
    let mut in_inline_text = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => {
                    last_index = row_index(&e, last_index)?;
                    current_row = Some(Row::new(last_index));
                }
                b"c" => {
                    current_cell = Some(cell_start(&e)?);
                }
                b"v" => {
                    if let Some(cell) = current_cell.as_mut() {
                        cell.raw_text.get_or_insert_with(String::new);
                        in_value = true;
                    }
                }
                b"is" => {
                    if let Some(cell) = current_cell.as_mut() {
                        cell.inline_text.get_or_insert_with(String::new);
                        in_inline_str = true;
                    }
                }
                b"rPh" if in_inline_str => in_phonetic = true,
                b"t" if in_inline_str && !in_phonetic => in_inline_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"row" => {
                    last_index = row_index(&e, last_index)?;
                    rows.push(Row::new(last_index));
                }
                b"c" => {
                    let cell = cell_start(&e)?;
                    push_cell(&mut current_row, cell)?;
                }
                b"v" => {
                    if let Some(cell) = current_cell.as_mut() {
                        cell.raw_text.get_or_insert_with(String::new);
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"row" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"c" => {
                    if let Some(cell) = current_cell.take() {
                        push_cell(&mut current_row, cell)?;
                    }
                    in_value = false;
                    in_inline_str = false;
                }
                b"v" => in_value = false,
                b"is" => {
                    if let Some(text) = current_cell
                        .as_mut()
                        .and_then(|c| c.inline_text.as_mut())
                    {
                        let decoded = decode_excel_escapes(text).into_owned();
                        *text = decoded;
                    }
                    in_inline_str = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_inline_text = false,
                _ => {}
            },
            Event::Text(e) if in_value || in_inline_text => {
                let text = e.unescape()?;
                if let Some(cell) = current_cell.as_mut() {
                    let target = if in_value {
                        &mut cell.raw_text
                    } else {
                        &mut cell.inline_text
                    };
                    target.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

/// Index of a `<row>`; a row without `r` follows the previous one
fn row_index(e: &BytesStart<'_>, previous: u32) -> XlsxResult<u32> {
    match attr_value(e, b"r")? {
        Some(r) => r
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|&i| i > 0)
            .ok_or_else(|| XlsxError::corrupt(format!("invalid row index '{}'", r))),
        None => {
            let index = previous + 1;
            log::warn!("row without an index attribute, assuming {}", index);
            Ok(index)
        }
    }
}

/// A cell from the attributes of its `<c>` element
fn cell_start(e: &BytesStart<'_>) -> XlsxResult<RawCell> {
    let mut reference = None;
    let mut type_attr = None;
    let mut style_index = 0;

    for attr in e.attributes().flatten() {
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"r" => reference = Some(CellReference::parse(&value)?),
            b"t" => type_attr = Some(value.into_owned()),
            b"s" => {
                style_index = value.trim().parse::<u32>().map_err(|_| {
                    XlsxError::corrupt(format!("invalid style index '{}'", value))
                })?
            }
            _ => {}
        }
    }

    let type_tag = CellTypeTag::from_xlsx(type_attr.as_deref()).ok_or_else(|| {
        XlsxError::corrupt(format!(
            "unknown cell type '{}'",
            type_attr.as_deref().unwrap_or_default()
        ))
    })?;

    Ok(RawCell {
        reference,
        type_tag,
        raw_text: None,
        inline_text: None,
        style_index,
    })
}

fn push_cell(row: &mut Option<Row>, cell: RawCell) -> XlsxResult<()> {
    match row {
        Some(row) => {
            row.push(cell);
            Ok(())
        }
        None => Err(XlsxError::corrupt("cell outside of a row")),
    }
}

/// XLSX import entry points
pub struct XlsxReader;

impl XlsxReader {
    /// Import a sheet as one record per row, keyed by column letters
    ///
    /// Row 1 is skipped unless [`ImportOptions::include_header`] is set.
    pub fn import_records<R: Read + Seek>(
        reader: R,
        sheet: &str,
        options: &ImportOptions,
    ) -> XlsxResult<Vec<RowRecord>> {
        let mut doc = XlsxDocument::open(reader)?;
        Self::records_from(&mut doc, sheet, options)
    }

    /// Import records from a file path
    pub fn import_records_file<P: AsRef<Path>>(
        path: P,
        sheet: &str,
        options: &ImportOptions,
    ) -> XlsxResult<Vec<RowRecord>> {
        let mut doc = XlsxDocument::open_file(path)?;
        Self::records_from(&mut doc, sheet, options)
    }

    /// Import records from an open document
    pub fn records_from<R: Read + Seek>(
        doc: &mut XlsxDocument<R>,
        sheet: &str,
        options: &ImportOptions,
    ) -> XlsxResult<Vec<RowRecord>> {
        let scanner = doc.scanner(sheet)?;
        let strings = doc.shared_strings();
        let first = options.first_row();

        let records = scanner
            .rows()
            .filter(|row| row.index >= first)
            .map(|row| decode_record(row, strings))
            .collect::<gridcodec_core::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Import a sheet as a table whose first row names the columns
    pub fn import_table<R: Read + Seek>(reader: R, sheet: &str) -> XlsxResult<DataTable> {
        let mut doc = XlsxDocument::open(reader)?;
        Self::table_from(&mut doc, sheet)
    }

    /// Import a table from a file path
    pub fn import_table_file<P: AsRef<Path>>(path: P, sheet: &str) -> XlsxResult<DataTable> {
        let mut doc = XlsxDocument::open_file(path)?;
        Self::table_from(&mut doc, sheet)
    }

    /// Import a table from an open document
    pub fn table_from<R: Read + Seek>(
        doc: &mut XlsxDocument<R>,
        sheet: &str,
    ) -> XlsxResult<DataTable> {
        let scanner = doc.scanner(sheet)?;
        let strings = doc.shared_strings();

        let mut rows = scanner.rows();
        let header = match rows.next() {
            Some(row) => row,
            None => return Ok(DataTable::default()),
        };

        let width = placed_cells(header).map(|(c, _)| c).max().unwrap_or(0);
        if width > MAX_TABLE_COLUMNS {
            return Err(Error::corrupt(format!(
                "header reaches column {} ({}), past the {} column limit",
                column_letters(width),
                width,
                MAX_TABLE_COLUMNS
            ))
            .into());
        }
        let mut names: Vec<String> = (1..=width).map(column_letters).collect();
        for (column, cell) in placed_cells(header) {
            let value = codec::decode(cell, strings)?;
            if !value.is_null() {
                names[column as usize - 1] = value.to_string();
            }
        }

        let mut table = DataTable::new(names);
        for row in rows {
            let mut values = vec![TypedValue::Null; width as usize];
            for (column, cell) in placed_cells(row) {
                if column > width {
                    if cell.has_value() {
                        return Err(Error::corrupt(format!(
                            "cell {}{} lies outside the {} header column(s)",
                            column_letters(column),
                            row.index,
                            width
                        ))
                        .into());
                    }
                    continue;
                }
                values[column as usize - 1] = codec::decode(cell, strings)?;
            }
            table.push_row(values)?;
        }

        Ok(table)
    }
}
