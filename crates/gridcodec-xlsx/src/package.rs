//! The spreadsheet package: a zip archive of XML parts

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, Write};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use gridcodec_core::{Error, SharedStringTable};

use crate::error::{XlsxError, XlsxResult};
use crate::reader::SheetScanner;
use crate::xml::{attr_value, decode_excel_escapes, escape_xml};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

const WORKSHEET_REL_TYPE: &str = "/worksheet";

/// A sheet listed by the workbook
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    path: String,
}

/// An opened spreadsheet document
///
/// Holds the archive, the sheet list and the shared string table. Sheets
/// are parsed on demand by [`scanner`](Self::scanner).
pub struct XlsxDocument<R> {
    archive: ZipArchive<R>,
    sheets: Vec<SheetEntry>,
    shared_strings: SharedStringTable,
}

impl<R> fmt::Debug for XlsxDocument<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XlsxDocument")
            .field("sheets", &self.sheets)
            .field("shared_strings", &self.shared_strings.len())
            .finish_non_exhaustive()
    }
}

impl XlsxDocument<BufReader<File>> {
    /// Open a document from a file path
    pub fn open_file<P: AsRef<Path>>(path: P) -> XlsxResult<Self> {
        let file = File::open(path)?;
        Self::open(BufReader::new(file))
    }
}

impl<R: Read + Seek> XlsxDocument<R> {
    /// Open a document from a reader
    pub fn open(reader: R) -> XlsxResult<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| XlsxError::DocumentOpenFailed(format!("not a zip package: {}", e)))?;

        if archive.by_name(CONTENT_TYPES_PART).is_err() {
            return Err(XlsxError::DocumentOpenFailed(format!(
                "missing {}",
                CONTENT_TYPES_PART
            )));
        }

        let listed = read_workbook_xml(&mut archive)?;
        let rels = read_workbook_rels(&mut archive)?;

        let mut sheets = Vec::with_capacity(listed.len());
        for (name, r_id) in listed {
            let (rel_type, path) = rels.get(&r_id).ok_or_else(|| {
                XlsxError::corrupt(format!(
                    "sheet '{}' refers to missing relationship '{}'",
                    name, r_id
                ))
            })?;
            if !rel_type.ends_with(WORKSHEET_REL_TYPE) {
                log::warn!(
                    "skipping sheet '{}': relationship type '{}' is not a worksheet",
                    name,
                    rel_type
                );
                continue;
            }
            sheets.push(SheetEntry {
                name,
                path: path.clone(),
            });
        }

        let shared_strings = read_shared_strings(&mut archive)?;

        log::debug!(
            "opened document with {} sheet(s) and {} shared string(s)",
            sheets.len(),
            shared_strings.len()
        );

        Ok(Self {
            archive,
            sheets,
            shared_strings,
        })
    }

    /// Names of the worksheets, in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// The document's shared string table
    pub fn shared_strings(&self) -> &SharedStringTable {
        &self.shared_strings
    }

    /// Parse the named sheet
    ///
    /// Fails with [`Error::SheetNotFound`] before reading any row when no
    /// sheet has that name.
    pub fn scanner(&mut self, name: &str) -> XlsxResult<SheetScanner> {
        let path = self
            .sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.path.clone())
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;

        log::trace!("reading part {}", path);
        let part = self
            .archive
            .by_name(&path)
            .map_err(|_| XlsxError::corrupt(format!("missing worksheet part {}", path)))?;

        SheetScanner::parse(name, BufReader::new(part))
    }
}

/// Read workbook.xml to get sheet names and relationship ids
fn read_workbook_xml<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> XlsxResult<Vec<(String, String)>> {
    log::trace!("reading part {}", WORKBOOK_PART);
    let file = archive
        .by_name(WORKBOOK_PART)
        .map_err(|_| XlsxError::corrupt(format!("missing {}", WORKBOOK_PART)))?;

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
                let name = attr_value(&e, b"name")?;
                let r_id = attr_value(&e, b"r:id")?;
                match (name, r_id) {
                    (Some(name), Some(r_id)) => sheets.push((name, r_id)),
                    _ => return Err(XlsxError::corrupt("sheet entry without name or r:id")),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Read workbook.xml.rels, mapping relationship id to (type, part path)
fn read_workbook_rels<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> XlsxResult<HashMap<String, (String, String)>> {
    log::trace!("reading part {}", WORKBOOK_RELS_PART);
    let file = archive
        .by_name(WORKBOOK_RELS_PART)
        .map_err(|_| XlsxError::corrupt(format!("missing {}", WORKBOOK_RELS_PART)))?;

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id")?;
                let target = attr_value(&e, b"Target")?;
                let rel_type = attr_value(&e, b"Type")?;

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    rels.insert(id, (rel_type, resolve_target(&target)));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Targets are relative to `xl/` unless absolute
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// Read the shared string table; a missing part is an empty table
fn read_shared_strings<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> XlsxResult<SharedStringTable> {
    let file = match archive.by_name(SHARED_STRINGS_PART) {
        Ok(f) => f,
        Err(_) => return Ok(SharedStringTable::new()),
    };
    log::trace!("reading part {}", SHARED_STRINGS_PART);

    parse_shared_strings(BufReader::new(file))
}

/// Parse `sharedStrings.xml`
///
/// Each `<si>` is one entry: its `<t>` text, or the concatenated `<t>` of
/// its rich text runs. Phonetic runs (`<rPh>`) are not part of the value.
pub(crate) fn parse_shared_strings<B: BufRead>(reader: B) -> XlsxResult<SharedStringTable> {
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut table = SharedStringTable::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"si" => {
                table.push(String::new());
            }
            Event::End(e) => match e.name().as_ref() {
                b"si" => {
                    table.push(decode_excel_escapes(&current).into_owned());
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Text(e) if in_t => {
                current.push_str(&e.unescape()?);
            }
            Event::CData(e) if in_t => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(table)
}

/// Write a single-sheet package into `writer` and return it
///
/// The parts are fixed: content types, root and workbook relationships,
/// the workbook, the style sheet and one worksheet.
pub(crate) fn write_package<W: Write + Seek>(
    writer: W,
    sheet_name: &str,
    styles_xml: &str,
    sheet_xml: &str,
) -> XlsxResult<W> {
    assemble_package(writer, sheet_name, styles_xml, sheet_xml)
        .map_err(|e| XlsxError::DocumentCreationFailed(e.to_string()))
}

fn assemble_package<W: Write + Seek>(
    writer: W,
    sheet_name: &str,
    styles_xml: &str,
    sheet_xml: &str,
) -> XlsxResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();

    zip.start_file(CONTENT_TYPES_PART, options)?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
    )?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    )?;

    zip.start_file(WORKBOOK_PART, options)?;
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
        escape_xml(sheet_name)
    );
    zip.write_all(workbook.as_bytes())?;

    zip.start_file(WORKBOOK_RELS_PART, options)?;
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
    )?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(styles_xml.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(sheet_xml.as_bytes())?;

    Ok(zip.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn package(parts: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, body) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        let mut cursor = zip.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    const CONTENT_TYPES: &str = r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#;
    const WORKBOOK: &str = r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Data" sheetId="1" r:id="rId1"/><sheet name="Chart" sheetId="2" r:id="rId2"/></sheets></workbook>"#;
    const RELS: &str = r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chartsheet" Target="chartsheets/sheet1.xml"/></Relationships>"#;
    const SHEET: &str = r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c></row></sheetData></worksheet>"#;

    #[test]
    fn test_open_lists_worksheets_only() {
        let cursor = package(&[
            (CONTENT_TYPES_PART, CONTENT_TYPES),
            (WORKBOOK_PART, WORKBOOK),
            (WORKBOOK_RELS_PART, RELS),
            ("xl/worksheets/sheet1.xml", SHEET),
        ]);

        let doc = XlsxDocument::open(cursor).unwrap();
        assert_eq!(doc.sheet_names(), vec!["Data"]);
        assert!(doc.shared_strings().is_empty());
    }

    #[test]
    fn test_scanner_unknown_sheet() {
        let cursor = package(&[
            (CONTENT_TYPES_PART, CONTENT_TYPES),
            (WORKBOOK_PART, WORKBOOK),
            (WORKBOOK_RELS_PART, RELS),
            ("xl/worksheets/sheet1.xml", SHEET),
        ]);

        let mut doc = XlsxDocument::open(cursor).unwrap();
        let err = doc.scanner("Missing").unwrap_err();
        assert!(err.is_sheet_not_found());
    }

    #[test]
    fn test_missing_worksheet_part_is_corrupt() {
        let cursor = package(&[
            (CONTENT_TYPES_PART, CONTENT_TYPES),
            (WORKBOOK_PART, WORKBOOK),
            (WORKBOOK_RELS_PART, RELS),
        ]);

        let mut doc = XlsxDocument::open(cursor).unwrap();
        assert!(doc.scanner("Data").unwrap_err().is_corrupt());
    }

    #[test]
    fn test_open_failures() {
        let not_zip = Cursor::new(b"plain text".to_vec());
        assert!(matches!(
            XlsxDocument::open(not_zip),
            Err(XlsxError::DocumentOpenFailed(_))
        ));

        let no_types = package(&[(WORKBOOK_PART, WORKBOOK)]);
        assert!(matches!(
            XlsxDocument::open(no_types),
            Err(XlsxError::DocumentOpenFailed(_))
        ));

        let no_workbook = package(&[(CONTENT_TYPES_PART, CONTENT_TYPES)]);
        assert!(XlsxDocument::open(no_workbook).unwrap_err().is_corrupt());
    }

    #[test]
    fn test_dangling_relationship_is_corrupt() {
        let rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#;
        let cursor = package(&[
            (CONTENT_TYPES_PART, CONTENT_TYPES),
            (WORKBOOK_PART, WORKBOOK),
            (WORKBOOK_RELS_PART, rels),
        ]);
        assert!(XlsxDocument::open(cursor).unwrap_err().is_corrupt());
    }

    #[test]
    fn test_parse_shared_strings() {
        let xml = r#"<?xml version="1.0"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
  <si><t>plain</t></si>
  <si><r><t>rich </t></r><r><rPr><b/></rPr><t>text</t></r></si>
  <si><t>漢字</t><rPh sb="0" eb="2"><t>カンジ</t></rPh></si>
  <si><t>a_x000d_b &amp; c</t></si>
  <si/>
</sst>"#;

        let table = parse_shared_strings(xml.as_bytes()).unwrap();
        let strings: Vec<&str> = table.iter().collect();
        assert_eq!(strings, vec!["plain", "rich text", "漢字", "a\rb & c", ""]);
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn test_write_package_round_trips_names() {
        let cursor = write_package(
            Cursor::new(Vec::new()),
            "Q1 & Q2",
            "<styleSheet/>",
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#,
        )
        .unwrap();

        let mut cursor = cursor;
        cursor.set_position(0);
        let mut doc = XlsxDocument::open(cursor).unwrap();
        assert_eq!(doc.sheet_names(), vec!["Q1 & Q2"]);
        assert_eq!(doc.scanner("Q1 & Q2").unwrap().row_count(), 0);
    }
}
