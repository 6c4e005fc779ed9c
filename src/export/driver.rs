//! Export drivers: the robust three-strategy run and the simple run with metadata

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Config, ExportDriver};
use crate::error::Result;
use crate::model::{Dataset, DatasetCollection};

use super::metadata::{write_metadata, ExportMetadata};
use super::{ExportSummary, Exporter};

/// A CSV file found in the output directory after the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub name: String,
    pub bytes: u64,
}

/// Everything an export run produced
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub summary: ExportSummary,
    pub summary_path: PathBuf,
    pub metadata_path: Option<PathBuf>,
    pub files: Vec<ExportedFile>,
}

/// Export all present datasets and write the summary artifact.
///
/// Per-table failures end up in the summary; a failure to write the summary or
/// the metadata document is returned as an error.
pub fn run_export(collection: &DatasetCollection, config: &Config) -> Result<ExportReport> {
    for dataset in collection.missing() {
        warn!(dataset = %dataset, "dataset not loaded, nothing to export");
    }

    let exporter = match config.driver {
        ExportDriver::Robust => Exporter::new(),
        ExportDriver::Simple => Exporter::primary_only(),
    };
    info!(
        output_dir = %config.output_dir.display(),
        strategies = ?exporter.strategy_names(),
        "exporting {} datasets",
        collection.len()
    );

    let summary = exporter.export_all(
        collection.iter().map(|(d, t)| (d.file_stem(), t)),
        &config.output_dir,
    )?;

    let summary_path = config.summary_path();
    summary.write_csv(&summary_path)?;
    info!(path = %summary_path.display(), "wrote export summary");

    let metadata_path = match config.driver {
        ExportDriver::Simple => {
            let datasets: Vec<Dataset> = collection.iter().map(|(d, _)| d).collect();
            let path = config.metadata_path();
            write_metadata(&ExportMetadata::new(&datasets), &path)?;
            info!(path = %path.display(), "wrote dataset metadata");
            Some(path)
        }
        ExportDriver::Robust => None,
    };

    let files = list_exported_files(&config.output_dir)?;

    Ok(ExportReport {
        summary,
        summary_path,
        metadata_path,
        files,
    })
}

/// CSV files in `dir`, sorted by name
pub fn list_exported_files(dir: &Path) -> Result<Vec<ExportedFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        files.push(ExportedFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            bytes: entry.metadata()?.len(),
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}
