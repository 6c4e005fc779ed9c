//! CSV file parser

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{CellValue, Table};

/// Parser for CSV files
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

impl CsvParser {
    /// Parse a CSV file with a header row into a table
    pub fn parse(&self, path: &Path) -> Result<Table> {
        let file = File::open(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse CSV from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut table = Table::new(headers.iter());

        for result in csv_reader.records() {
            let record = result?;
            let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            // Short rows are padded with nulls by the table
            table.add_row(cells);
        }

        Ok(table)
    }
}

/// Parse a field into a CellValue with type inference.
///
/// Only the empty field is treated as missing; sentinels such as `N/A` stay
/// as text so the cleaning plan can decide what to do with them.
pub fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return CellValue::Null;
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    // Reject words like "inf" / "NaN" that f64 parsing accepts
    if trimmed.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.')) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }
    }

    CellValue::String(Cow::Owned(s.to_string()))
}
