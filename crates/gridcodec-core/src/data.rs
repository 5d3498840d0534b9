//! Tabular data exchanged with callers

use crate::cell::TypedValue;
use crate::error::{Error, Result};

/// A generic table: named columns and ordered rows of typed values
///
/// Every row has exactly one value per column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<TypedValue>>,
}

impl DataTable {
    /// Create an empty table with the given column names
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    ///
    /// Fails with [`Error::InvalidTable`] if the row width differs from
    /// the column count.
    pub fn push_row<I, V>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<TypedValue>,
    {
        let row: Vec<TypedValue> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(Error::InvalidTable(format!(
                "row {} has {} values but the table has {} columns",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style [`push_row`](Self::push_row)
    pub fn with_row<I, V>(mut self, row: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<TypedValue>,
    {
        self.push_row(row)?;
        Ok(self)
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Find a column by name
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<TypedValue>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get one value
    pub fn value(&self, row: usize, column: usize) -> Option<&TypedValue> {
        self.rows.get(row)?.get(column)
    }
}

/// One imported row as an ordered mapping of column name to value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRecord {
    /// 1-based index of the row this record was read from
    pub row: u32,
    entries: Vec<(String, TypedValue)>,
}

impl RowRecord {
    /// Create an empty record for a row
    pub fn new(row: u32) -> Self {
        Self {
            row,
            entries: Vec::new(),
        }
    }

    /// Set a value, replacing any value already held under the same name
    pub fn insert<S: Into<String>>(&mut self, name: S, value: TypedValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get a value by column name
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Column names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the record has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
