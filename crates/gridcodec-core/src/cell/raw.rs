//! Raw cells and rows as they sit in a sheet's cell grid

use std::fmt;

use super::CellReference;

/// The type tag stored on a raw cell (the OOXML `t` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellTypeTag {
    /// No tag; the value, if any, is taken verbatim
    #[default]
    None,
    /// `b`
    Boolean,
    /// `n`
    Number,
    /// `d` (ISO 8601 date)
    Date,
    /// `inlineStr`
    InlineString,
    /// `s` (index into the shared string table)
    SharedString,
    /// `str` (formula string result)
    String,
    /// `e` (error value such as `#N/A`)
    Error,
}

impl CellTypeTag {
    /// Map the `t` attribute of a cell. `None` means the attribute was absent.
    pub fn from_xlsx(t: Option<&str>) -> Option<Self> {
        match t {
            None => Some(CellTypeTag::None),
            Some("b") => Some(CellTypeTag::Boolean),
            Some("n") => Some(CellTypeTag::Number),
            Some("d") => Some(CellTypeTag::Date),
            Some("inlineStr") => Some(CellTypeTag::InlineString),
            Some("s") => Some(CellTypeTag::SharedString),
            Some("str") => Some(CellTypeTag::String),
            Some("e") => Some(CellTypeTag::Error),
            Some(_) => None,
        }
    }

    /// The `t` attribute to write, if any.
    ///
    /// Numbers are the OOXML default and are written without a tag.
    pub fn xlsx_type(&self) -> Option<&'static str> {
        match self {
            CellTypeTag::None | CellTypeTag::Number => None,
            CellTypeTag::Boolean => Some("b"),
            CellTypeTag::Date => Some("d"),
            CellTypeTag::InlineString => Some("inlineStr"),
            CellTypeTag::SharedString => Some("s"),
            CellTypeTag::String => Some("str"),
            CellTypeTag::Error => Some("e"),
        }
    }

    /// Get the tag name for messages
    pub fn as_str(&self) -> &'static str {
        match self {
            CellTypeTag::None => "none",
            CellTypeTag::Boolean => "boolean",
            CellTypeTag::Number => "number",
            CellTypeTag::Date => "date",
            CellTypeTag::InlineString => "inline string",
            CellTypeTag::SharedString => "shared string",
            CellTypeTag::String => "string",
            CellTypeTag::Error => "error",
        }
    }
}

impl fmt::Display for CellTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cell before decoding (read path) or after encoding (write path)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCell {
    /// Position of the cell, when the document records it
    pub reference: Option<CellReference>,
    /// Type tag
    pub type_tag: CellTypeTag,
    /// Content of the `<v>` element
    pub raw_text: Option<String>,
    /// Concatenated text of the `<is>` element
    pub inline_text: Option<String>,
    /// Index into the style catalog (0 = default)
    pub style_index: u32,
}

impl RawCell {
    /// Create an untyped cell with no content
    pub fn new(type_tag: CellTypeTag) -> Self {
        Self {
            type_tag,
            ..Self::default()
        }
    }

    /// Set the raw `<v>` text
    pub fn with_raw_text<S: Into<String>>(mut self, text: S) -> Self {
        self.raw_text = Some(text.into());
        self
    }

    /// Set the inline string text
    pub fn with_inline_text<S: Into<String>>(mut self, text: S) -> Self {
        self.inline_text = Some(text.into());
        self
    }

    /// Set the cell reference
    pub fn at(mut self, reference: CellReference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Set the style index
    pub fn styled(mut self, style_index: u32) -> Self {
        self.style_index = style_index;
        self
    }

    /// Whether the cell holds any content at all
    pub fn has_value(&self) -> bool {
        self.raw_text.is_some() || self.inline_text.is_some()
    }
}

/// A row of raw cells, tagged with its 1-based index
///
/// Cells are ordered by increasing column index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// Row index (1-based)
    pub index: u32,
    /// Cells in column order
    pub cells: Vec<RawCell>,
}

impl Row {
    /// Create an empty row
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Append a cell
    pub fn push(&mut self, cell: RawCell) {
        self.cells.push(cell);
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Find a cell by its 1-based column index
    pub fn cell(&self, column: u32) -> Option<&RawCell> {
        self.cells
            .iter()
            .find(|c| c.reference.map(|r| r.column()) == Some(column))
    }
}
