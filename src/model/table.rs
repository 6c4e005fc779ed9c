//! Table, Column, and Cell data structures

use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, SchemaError};

use super::schema::CellType;

/// A cell value with type information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            // Cross-type numeric comparison
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64) == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == (*b as f64),
            _ => false,
        }
    }
}

impl CellValue {
    /// Check if the value is the missing marker
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Borrow the text payload, if this is a text cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Numeric payload as f64, if this is a numeric cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Type of this single cell
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
        }
    }

    /// Render the cell as a CSV field: missing values become the empty string.
    pub fn to_field(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(format_float(*f)),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            other => other.to_field(),
        }
    }
}

/// Format a float so that integral values keep a fractional digit (`2.0`).
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Cell values in row order
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Create a new column with name and cells
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Infer the column type from its cells
    pub fn inferred_type(&self) -> CellType {
        self.cells
            .iter()
            .fold(CellType::Null, |acc, cell| acc.widen(cell.cell_type()))
    }

    /// Number of missing cells
    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_null()).count()
    }
}

/// A row-aligned table: every column holds `row_count` cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table with the given column names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names
                .into_iter()
                .map(|name| Column::new(name, Vec::new()))
                .collect(),
            row_count: 0,
        }
    }

    /// Build a table from fully populated columns
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(Error::RaggedColumn {
                name: ragged.name.clone(),
                expected: row_count,
                found: ragged.len(),
            });
        }
        Ok(Self { columns, row_count })
    }

    /// Add a row to the table, padding with nulls or truncating to the column count
    pub fn add_row(&mut self, cells: Vec<CellValue>) {
        let mut cells = cells.into_iter();
        for column in &mut self.columns {
            column.cells.push(cells.next().unwrap_or(CellValue::Null));
        }
        self.row_count += 1;
    }

    /// Column definitions in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Replace the column at `index`, keeping row alignment
    pub fn replace_column(&mut self, index: usize, column: Column) -> Result<()> {
        let found = column.len();
        if found != self.row_count {
            return Err(Error::RaggedColumn {
                name: column.name,
                expected: self.row_count,
                found,
            });
        }
        match self.columns.get_mut(index) {
            Some(slot) => {
                *slot = column;
                Ok(())
            }
            None => Err(SchemaError::ColumnNotFound(column.name).into()),
        }
    }

    /// Rename a column in place. Cells and column order are untouched.
    pub fn rename_column(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> std::result::Result<(), SchemaError> {
        let index = self
            .column_index(old_name)
            .ok_or_else(|| SchemaError::ColumnNotFound(old_name.to_string()))?;
        if old_name != new_name && self.column_index(new_name).is_some() {
            return Err(SchemaError::DuplicateColumn(new_name.to_string()));
        }
        self.columns[index].name = new_name.to_string();
        Ok(())
    }

    /// Apply `f` to every cell in the table
    pub fn map_cells<F>(&mut self, mut f: F)
    where
        F: FnMut(&CellValue) -> Option<CellValue>,
    {
        for column in &mut self.columns {
            for cell in &mut column.cells {
                if let Some(replacement) = f(cell) {
                    *cell = replacement;
                }
            }
        }
    }

    /// Get the cells of one row in column order
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.cells[index]).collect())
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count).map(move |i| self.columns.iter().map(|c| &c.cells[i]).collect())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total missing cells across all columns
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// Write the table as CSV with a header row and no index column.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(File::create(path)?);

        writer.write_record(self.column_names())?;
        for row in self.rows() {
            writer.write_record(row.iter().map(|c| c.to_field().into_owned()))?;
        }

        writer.flush()?;
        Ok(())
    }
}
