//! Load, clean, validate and export in one call

use tracing::info;

use crate::clean::{clean_collection, validate_collection, CleaningReport, ValidationReport};
use crate::config::Config;
use crate::error::Result;
use crate::export::{run_export, ExportReport};
use crate::model::DatasetCollection;
use crate::parser::load_collection;

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// `None` when cleaning was skipped
    pub cleaning: Option<CleaningReport>,
    pub validation: ValidationReport,
    pub export: ExportReport,
}

/// Clean an already-loaded collection and export it
pub fn process(mut collection: DatasetCollection, config: &Config) -> Result<RunReport> {
    let cleaning = if config.skip_clean {
        info!("cleaning skipped");
        None
    } else {
        Some(clean_collection(&mut collection))
    };

    let validation = validate_collection(&collection);
    let export = run_export(&collection, config)?;

    Ok(RunReport {
        cleaning,
        validation,
        export,
    })
}

/// Load the tables from `config.input_dir`, then [`process`] them
pub fn run(config: &Config) -> Result<RunReport> {
    let collection = load_collection(&config.input_dir)?;
    info!(
        input_dir = %config.input_dir.display(),
        loaded = collection.len(),
        "loaded datasets"
    );
    process(collection, config)
}
