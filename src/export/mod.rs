//! Resilient CSV export with fallback write strategies

mod driver;
mod metadata;
mod strategy;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::model::Table;

pub use driver::{list_exported_files, run_export, ExportReport, ExportedFile};
pub use metadata::{write_metadata, ExportMetadata};
pub use strategy::{
    default_strategies, escape_field, FieldWriter, ManualWriter, NativeWriter, WriteStrategy,
    DELIMITER,
};

/// Header of the summary artifact
pub const SUMMARY_HEADER: [&str; 5] = ["Dataset", "Rows", "Columns", "File_Size_KB", "Status"];

/// Outcome of exporting one table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportStatus {
    Success,
    Failed,
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportStatus::Success => write!(f, "Success"),
            ExportStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// One row of the export summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    #[serde(rename = "Dataset")]
    pub dataset: String,
    #[serde(rename = "Rows")]
    pub rows: usize,
    #[serde(rename = "Columns")]
    pub columns: usize,
    /// Size of the written file in KiB, rounded to 2 decimals; 0 on failure
    #[serde(rename = "File_Size_KB")]
    pub file_size_kb: f64,
    #[serde(rename = "Status")]
    pub status: ExportStatus,
    /// Name of the strategy that produced the file
    #[serde(skip)]
    pub strategy: Option<String>,
}

impl ExportRecord {
    fn success(name: &str, table: &Table, bytes: u64, strategy: &str) -> Self {
        Self {
            dataset: name.to_string(),
            rows: table.row_count(),
            columns: table.column_count(),
            file_size_kb: bytes_to_kib(bytes),
            status: ExportStatus::Success,
            strategy: Some(strategy.to_string()),
        }
    }

    fn failed(name: &str, table: &Table) -> Self {
        Self {
            dataset: name.to_string(),
            rows: table.row_count(),
            columns: table.column_count(),
            file_size_kb: 0.0,
            status: ExportStatus::Failed,
            strategy: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExportStatus::Success
    }
}

/// Bytes to KiB rounded to two decimals
pub fn bytes_to_kib(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

/// Ordered records of one export run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    pub records: Vec<ExportRecord>,
}

impl ExportSummary {
    pub fn successes(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn failures(&self) -> usize {
        self.records.len() - self.successes()
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures() == 0
    }

    /// Look up a record by dataset name
    pub fn get(&self, dataset: &str) -> Option<&ExportRecord> {
        self.records.iter().find(|r| r.dataset == dataset)
    }

    /// Write the summary artifact: one row per table under [`SUMMARY_HEADER`]
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(path)?;

        writer.write_record(SUMMARY_HEADER)?;
        for record in &self.records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Writes tables with an ordered chain of strategies
pub struct Exporter {
    strategies: Vec<Box<dyn WriteStrategy>>,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter {
    /// Exporter with the full native / field writer / manual chain
    pub fn new() -> Self {
        Self::with_strategies(default_strategies())
    }

    /// Exporter that only tries the primary strategy
    pub fn primary_only() -> Self {
        Self::with_strategies(vec![Box::new(NativeWriter)])
    }

    /// Exporter with a custom strategy chain
    pub fn with_strategies(strategies: Vec<Box<dyn WriteStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the strategies in the order they are tried
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Export one table to `<out_dir>/<name>.csv`.
    ///
    /// Never fails: if every strategy errors, the record is marked `Failed`.
    pub fn export_table(&self, name: &str, table: &Table, out_dir: &Path) -> ExportRecord {
        let path = export_path(out_dir, name);

        for strategy in &self.strategies {
            match strategy.write(table, &path) {
                Ok(()) => match fs::metadata(&path) {
                    Ok(meta) => {
                        info!(
                            dataset = name,
                            strategy = strategy.name(),
                            rows = table.row_count(),
                            columns = table.column_count(),
                            bytes = meta.len(),
                            "exported"
                        );
                        return ExportRecord::success(name, table, meta.len(), strategy.name());
                    }
                    Err(e) => {
                        warn!(
                            dataset = name,
                            strategy = strategy.name(),
                            error = %e,
                            "written file is unreadable"
                        );
                    }
                },
                Err(e) => {
                    warn!(
                        dataset = name,
                        strategy = strategy.name(),
                        error = %e,
                        "write strategy failed"
                    );
                }
            }
        }

        error!(dataset = name, "all write strategies failed");
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                warn!(dataset = name, error = %e, "could not remove partial file");
            }
        }
        ExportRecord::failed(name, table)
    }

    /// Export every table in order. Only creating `out_dir` can fail the run.
    pub fn export_all<'a, I>(&self, tables: I, out_dir: &Path) -> Result<ExportSummary>
    where
        I: IntoIterator<Item = (&'a str, &'a Table)>,
    {
        fs::create_dir_all(out_dir)?;

        let records = tables
            .into_iter()
            .map(|(name, table)| self.export_table(name, table, out_dir))
            .collect();
        let summary = ExportSummary { records };

        info!(
            total = summary.total(),
            succeeded = summary.successes(),
            failed = summary.failures(),
            "export finished"
        );
        Ok(summary)
    }
}

/// Path a table named `name` is exported to
pub fn export_path(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{}.csv", name))
}
