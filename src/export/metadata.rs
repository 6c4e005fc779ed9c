//! Descriptive metadata written alongside the exported tables for BI tools

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::model::Dataset;

const DATA_SOURCE: &str = "CDC COVID-19 Data";

const CLEANING_APPLIED: [&str; 4] = [
    "Range values converted to midpoint (e.g., \"436120 - 436129\" → 436124.5)",
    "Special characters like \"<0.1\" converted to 0.05 (midpoint estimate)",
    "N/A values converted to missing for proper handling",
    "Column names standardized across datasets",
];

const NOTES_FOR_BI_TOOLS: [&str; 4] = [
    "All numeric columns are properly formatted for calculations",
    "Missing values are represented as empty cells (will appear as null in BI tools)",
    "Percentage columns are in decimal format (e.g., 0.05 = 0.05%, not 5%)",
    "Count columns contain actual numeric values ready for aggregation",
];

/// Contents of `dataset_metadata.json`
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub export_date: String,
    pub total_datasets: usize,
    pub data_source: String,
    pub cleaning_applied: Vec<String>,
    pub notes_for_bi_tools: Vec<String>,
    pub recommended_visualizations: IndexMap<String, String>,
}

impl ExportMetadata {
    /// Metadata for an export of `datasets`, stamped with the current local time
    pub fn new(datasets: &[Dataset]) -> Self {
        Self::at(datasets, Local::now().naive_local())
    }

    /// Metadata stamped with a fixed time
    pub fn at(datasets: &[Dataset], exported: NaiveDateTime) -> Self {
        Self {
            export_date: exported.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            total_datasets: datasets.len(),
            data_source: DATA_SOURCE.to_string(),
            cleaning_applied: CLEANING_APPLIED.iter().map(|s| s.to_string()).collect(),
            notes_for_bi_tools: NOTES_FOR_BI_TOOLS.iter().map(|s| s.to_string()).collect(),
            recommended_visualizations: datasets
                .iter()
                .map(|d| {
                    (
                        d.file_stem().to_string(),
                        d.recommended_visualization().to_string(),
                    )
                })
                .collect(),
        }
    }
}

/// Write metadata as pretty-printed JSON
pub fn write_metadata(metadata: &ExportMetadata, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, metadata)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
