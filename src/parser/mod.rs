//! Parser layer for reading the CDC tables from disk

mod csv;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Dataset, DatasetCollection};

pub use self::csv::{parse_cell_value, CsvParser};

/// Load every `<dataset>.csv` found in `dir`.
///
/// Missing files are skipped with a warning; an unreadable file is an error.
pub fn load_collection(dir: &Path) -> Result<DatasetCollection> {
    let parser = CsvParser;
    let mut collection = DatasetCollection::new();

    for dataset in Dataset::ALL {
        let path = dir.join(format!("{}.csv", dataset.file_stem()));
        if !path.is_file() {
            warn!(dataset = %dataset, path = %path.display(), "input file not found, skipping");
            continue;
        }

        let table = parser.parse(&path)?;
        debug!(
            dataset = %dataset,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        collection.insert(dataset, table);
    }

    Ok(collection)
}
