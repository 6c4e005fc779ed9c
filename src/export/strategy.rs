//! Interchangeable ways of writing a table to a CSV file

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::Result;
use crate::model::Table;

/// Field delimiter for every strategy
pub const DELIMITER: char = ',';

/// A single way of persisting a table. Strategies are tried in order until one succeeds.
pub trait WriteStrategy {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Write `table` to `path`, replacing any existing file
    fn write(&self, table: &Table, path: &Path) -> Result<()>;
}

/// Primary strategy: the table's own serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeWriter;

impl WriteStrategy for NativeWriter {
    fn name(&self) -> &str {
        "native"
    }

    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        table.write_csv(path)
    }
}

/// Fallback A: row-by-row through a standard CSV field writer
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldWriter;

impl WriteStrategy for FieldWriter {
    fn name(&self) -> &str {
        "field writer"
    }

    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER as u8)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_path(path)?;

        writer.write_record(table.column_names())?;

        for row in table.rows() {
            let fields: Vec<String> = row
                .into_iter()
                .map(|cell| {
                    if cell.is_null() {
                        String::new()
                    } else {
                        cell.to_field().into_owned()
                    }
                })
                .collect();
            writer.write_record(&fields)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Fallback B: no CSV library at all, quoting done by hand
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualWriter;

impl WriteStrategy for ManualWriter {
    fn name(&self) -> &str {
        "manual"
    }

    fn write(&self, table: &Table, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);

        let header: Vec<String> = table.column_names().map(escape_field).collect();
        writeln!(out, "{}", join_record(&header))?;

        for row in table.rows() {
            let fields: Vec<String> = row
                .into_iter()
                .map(|cell| escape_field(&cell.to_field()))
                .collect();
            writeln!(out, "{}", join_record(&fields))?;
        }

        out.flush()?;
        Ok(())
    }
}

/// Quote a field if it holds the delimiter, a quote or a line break; inner quotes are doubled.
pub fn escape_field(value: &str) -> String {
    if value.contains([DELIMITER, '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join escaped fields into one record.
///
/// A record made of a single empty field is written as `""` so it does not
/// read back as a blank line, which CSV readers skip.
fn join_record(fields: &[String]) -> String {
    match fields {
        [only] if only.is_empty() => "\"\"".to_string(),
        _ => fields.join(&DELIMITER.to_string()),
    }
}

/// The default fallback chain: native, then field writer, then manual
pub fn default_strategies() -> Vec<Box<dyn WriteStrategy>> {
    vec![
        Box::new(NativeWriter),
        Box::new(FieldWriter),
        Box::new(ManualWriter),
    ]
}
