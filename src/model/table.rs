//! Table, Row, and Cell data structures

use std::borrow::Cow;

/// A cell value, held as its display text
///
/// Values are never coerced: `"5"`, `"5.0"` and `" 5"` are three different
/// values. `Null` marks a missing cell and is distinct from `Text("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellValue {
    Null,
    Text(String),
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The text of a present value, `None` for null
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) => Some(s),
        }
    }

    /// Convert to a display string (null renders empty)
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Column index (0-based position)
    pub index: usize,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// A row in the table
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Row number in the source file, counting the header as row 1
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A table containing columns and rows in source order
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from a header and string rows; empty strings become null.
    ///
    /// Rows are numbered from 2, as if read from a file with one header line.
    pub fn from_rows<H, R, S>(headers: H, rows: R) -> Self
    where
        H: IntoIterator<Item = S>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.as_ref(), i))
            .collect();
        let mut table = Table::new(columns);
        for (i, row) in rows.into_iter().enumerate() {
            let cells = row
                .into_iter()
                .map(|s| match s.as_ref() {
                    "" => CellValue::Null,
                    text => CellValue::from(text),
                })
                .collect();
            table.add_row(cells, i + 2);
        }
        table
    }

    /// Add a row, padding short rows with nulls
    pub fn add_row(&mut self, mut cells: Vec<CellValue>, source_line: usize) {
        if cells.len() < self.column_count() {
            cells.resize(self.column_count(), CellValue::Null);
        }
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_numbers_from_two() {
        let table = Table::from_rows(["id", "val"], [["1", "x"], ["2", ""]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].source_line, 2);
        assert_eq!(table.rows[1].source_line, 3);
        assert_eq!(table.rows[1].get(1), Some(&CellValue::Null));
    }

    #[test]
    fn test_add_row_pads_short_rows() {
        let mut table = Table::new(vec![Column::new("a", 0), Column::new("b", 1)]);
        table.add_row(vec![CellValue::from("1")], 2);
        assert_eq!(table.rows[0].cells, vec![CellValue::from("1"), CellValue::Null]);
    }

    #[test]
    fn test_add_row_keeps_extra_cells() {
        let mut table = Table::new(vec![Column::new("a", 0)]);
        table.add_row(vec![CellValue::from("1"), CellValue::from("2")], 2);
        assert_eq!(table.rows[0].cells.len(), 2);
    }

    #[test]
    fn test_null_distinct_from_empty_text() {
        assert_ne!(CellValue::Null, CellValue::from(""));
        assert_eq!(CellValue::Null.display(), CellValue::from("").display());
    }
}
