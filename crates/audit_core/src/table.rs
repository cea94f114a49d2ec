//! In-memory table representation.
//!
//! A [`Table`] holds ordered column names and rows of typed cells. It is built
//! once by the loader and then only read: every pipeline stage borrows the same
//! snapshot.

use crate::{AuditError, Result};
use comfy_table::Table as TextTable;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// A single cell in a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null/missing value
    #[default]
    Null,
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl CellValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Float(_) => "float",
            CellValue::Text(_) => "text",
        }
    }

    /// Attempts to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    ///
    /// Text holding a number parses, so numeric cells of a mixed column
    /// still read as numbers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Null => None,
        }
    }

    /// Total order used for sorting and duplicate detection.
    ///
    /// Floats sort before text and nulls sort last. Two nulls compare equal,
    /// so rows with nulls in the same positions can still be duplicates.
    pub fn total_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Null, _) => Ordering::Greater,
            (_, CellValue::Null) => Ordering::Less,
            (CellValue::Float(a), CellValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
            }
            (CellValue::Float(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Float(_)) => Ordering::Greater,
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "null"),
            // Debug keeps the trailing ".0" so 150 renders as 150.0
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// Semantic type of a column, both expected (configuration) and observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free text
    #[serde(alias = "object", alias = "string")]
    Text,
    /// Floating point number
    #[serde(alias = "float64", alias = "double")]
    Float,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Float => write!(f, "float"),
        }
    }
}

/// A single row of cells, in column order.
pub type Row = Vec<CellValue>;

/// A dataset of named columns and typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a new table with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table from columns and rows.
    ///
    /// Fails if a column name repeats or a row is not exactly as wide as the header.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(AuditError::DuplicateColumn(column.clone()));
            }
        }

        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Appends a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(AuditError::row_width(
                self.rows.len(),
                self.columns.len(),
                row.len(),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns `row_count * column_count`.
    pub fn total_cells(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    /// Returns true if the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Gets a specific row by index.
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Gets a cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Returns the cells of one column, top to bottom.
    pub fn column_values(&self, column: &str) -> Option<impl Iterator<Item = &CellValue>> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().map(move |r| &r[col]))
    }

    /// Classifies a column by its cells.
    ///
    /// Any text cell makes the column `Text`. Columns holding only floats or
    /// nulls (including all-null columns) are `Float`.
    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        let mut values = self.column_values(column)?;
        if values.any(|v| matches!(v, CellValue::Text(_))) {
            Some(ColumnType::Text)
        } else {
            Some(ColumnType::Float)
        }
    }

    /// Compares two rows across every column, left to right.
    pub fn compare_rows(&self, a: usize, b: usize) -> Ordering {
        self.rows[a]
            .iter()
            .zip(&self.rows[b])
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Compares two rows on the given column positions only.
    pub fn compare_rows_on(&self, a: usize, b: usize, columns: &[usize]) -> Ordering {
        columns
            .iter()
            .map(|&c| self.rows[a][c].total_cmp(&self.rows[b][c]))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Renders the given rows as a text grid, prefixed by their row index.
    pub fn render_rows(&self, indices: &[usize]) -> String {
        let mut grid = TextTable::new();
        grid.load_preset(UTF8_FULL_CONDENSED);

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push("row".to_string());
        header.extend(self.columns.iter().cloned());
        grid.set_header(header);

        for &index in indices {
            if let Some(row) = self.row(index) {
                let mut cells = Vec::with_capacity(row.len() + 1);
                cells.push(index.to_string());
                cells.extend(row.iter().map(ToString::to_string));
                grid.add_row(cells);
            }
        }

        grid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        Table::from_rows(
            vec!["id".to_string(), "hours".to_string()],
            vec![
                vec!["b".into(), CellValue::Float(2.0)],
                vec!["a".into(), CellValue::Null],
                vec!["b".into(), CellValue::Float(2.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cell_value_types() {
        assert_eq!(CellValue::Null.type_name(), "null");
        assert_eq!(CellValue::from("x").type_name(), "text");
        assert_eq!(CellValue::from(1.5_f64).type_name(), "float");
        assert_eq!(CellValue::from(None::<f64>), CellValue::Null);
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::from(150.0_f64).to_string(), "150.0");
        assert_eq!(CellValue::from(0.5_f64).to_string(), "0.5");
        assert_eq!(CellValue::Null.to_string(), "null");
    }

    #[test]
    fn test_cell_ordering() {
        assert_eq!(CellValue::Null.total_cmp(&CellValue::Null), Ordering::Equal);
        assert_eq!(CellValue::from(1.0_f64).total_cmp(&"a".into()), Ordering::Less);
        assert_eq!(CellValue::from("a").total_cmp(&CellValue::Null), Ordering::Less);
        assert_eq!(CellValue::Float(0.0).total_cmp(&CellValue::Float(-0.0)), Ordering::Equal);
    }

    #[test]
    fn test_row_width_checked() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        let err = table.push_row(vec![CellValue::Null]).unwrap_err();
        assert!(matches!(
            err,
            AuditError::RowWidth {
                row: 0,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Table::from_rows(vec!["a".to_string(), "a".to_string()], vec![]).unwrap_err();
        assert!(matches!(err, AuditError::DuplicateColumn(_)));
    }

    #[test]
    fn test_column_type_classification() {
        let table = sample();
        assert_eq!(table.column_type("id"), Some(ColumnType::Text));
        assert_eq!(table.column_type("hours"), Some(ColumnType::Float));
        assert_eq!(table.column_type("missing"), None);

        let all_null = Table::from_rows(vec!["x".to_string()], vec![vec![CellValue::Null]]).unwrap();
        assert_eq!(all_null.column_type("x"), Some(ColumnType::Float));
    }

    #[test]
    fn test_compare_rows() {
        let table = sample();
        assert_eq!(table.compare_rows(0, 2), Ordering::Equal);
        assert_eq!(table.compare_rows(1, 0), Ordering::Less);
        assert_eq!(table.compare_rows_on(0, 1, &[1]), Ordering::Less);
    }

    #[test]
    fn test_render_rows() {
        let table = sample();
        let rendered = table.render_rows(&[0, 2]);
        assert!(rendered.contains("hours"));
        assert!(rendered.contains("2.0"));
        assert!(!rendered.contains("null"));
    }
}
