//! Cell reference math (A1-style strings <-> column/row pairs)

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Number of letters in the column numeral system
const RADIX: u32 = 26;

/// A cell reference (e.g., "A1", "AB12")
///
/// Both coordinates are 1-based: column 1 is "A", row 1 is the first row.
/// Columns are written as a bijective base-26 numeral (no zero digit), so
/// column 26 is "Z" and column 27 is "AA".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CellReference {
    column: u32,
    row: u32,
}

impl CellReference {
    /// Create a cell reference from a 1-based column and row
    pub fn new(column: u32, row: u32) -> Result<Self> {
        if column == 0 || row == 0 {
            return Err(Error::MalformedReference(format!(
                "column and row must be >= 1 (got column {}, row {})",
                column, row
            )));
        }
        Ok(Self { column, row })
    }

    /// Parse a cell reference from A1-style notation
    ///
    /// The leading run of ASCII letters is the column, the trailing run of
    /// ASCII digits is the row. Anything else (an empty run, characters of
    /// another class, or letters after digits) is rejected.
    ///
    /// # Examples
    /// ```
    /// use gridcodec_core::CellReference;
    ///
    /// let r = CellReference::parse("AB12").unwrap();
    /// assert_eq!(r.column(), 28);
    /// assert_eq!(r.row(), 12);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();

        let letters_end = bytes
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(bytes.len());
        if letters_end == 0 {
            return Err(Error::MalformedReference(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let digits = &bytes[letters_end..];
        if digits.is_empty() {
            return Err(Error::MalformedReference(format!("no row number in '{}'", s)));
        }
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(Error::MalformedReference(format!(
                "unexpected characters after row number in '{}'",
                s
            )));
        }

        let column = column_index(&s[..letters_end])?;
        let row: u32 = s[letters_end..]
            .parse()
            .map_err(|_| Error::MalformedReference(format!("row number out of range in '{}'", s)))?;

        if row == 0 {
            return Err(Error::MalformedReference(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { column, row })
    }

    /// Column index (1-based, A=1, B=2, ..., Z=26, AA=27)
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Row index (1-based)
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column letters of this reference ("A", "AB", ...)
    pub fn column_letters(&self) -> String {
        column_letters(self.column)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_letters(self.column), self.row)
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellReference {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<CellReference> for String {
    fn from(reference: CellReference) -> Self {
        reference.to_a1_string()
    }
}

/// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, ...)
///
/// Letters are case-insensitive. The most significant letter comes first.
pub fn column_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::MalformedReference("empty column letters".into()));
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::MalformedReference(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        index = index
            .checked_mul(RADIX)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| {
                Error::MalformedReference(format!("column '{}' is too large", letters))
            })?;
    }

    Ok(index)
}

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, ...)
///
/// Index 0 has no letters and yields an empty string.
pub fn column_letters(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = index;

    while n > 0 {
        n -= 1;
        letters.push((n % RADIX) as u8 + b'A');
        n /= RADIX;
    }

    letters.reverse();
    // Only ASCII uppercase letters were pushed
    letters.into_iter().map(char::from).collect()
}
