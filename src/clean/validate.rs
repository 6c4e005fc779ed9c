//! Post-clean diagnostics. Findings are reported, never enforced.

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{info, warn};

use crate::model::{Dataset, DatasetCollection, Table};

use super::normalize::{APPROX_PREFIX, NA_SENTINEL, RANGE_SEPARATOR};

/// Text values in one column that still look un-normalized
#[derive(Debug, Clone, Serialize)]
pub struct ProblemColumn {
    pub column: String,
    pub values: Vec<String>,
}

/// Shape and leftovers for one dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetValidation {
    pub dataset: Dataset,
    pub rows: usize,
    pub columns: usize,
    pub missing_values: usize,
    pub numeric_columns: Vec<String>,
    pub problems: Vec<ProblemColumn>,
}

/// Validation results for a whole collection
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub datasets: Vec<DatasetValidation>,
}

impl ValidationReport {
    /// Whether any dataset still has suspicious text values
    pub fn has_problems(&self) -> bool {
        self.datasets.iter().any(|d| !d.problems.is_empty())
    }
}

/// Whether a text value resembles a range, approximation or sentinel
pub fn looks_unnormalized(value: &str) -> bool {
    value.contains(APPROX_PREFIX) || value.contains(RANGE_SEPARATOR) || value == NA_SENTINEL
}

/// Inspect a single table
pub fn validate_table(dataset: Dataset, table: &Table) -> DatasetValidation {
    let numeric_columns = table
        .columns()
        .iter()
        .filter(|c| c.inferred_type().is_numeric())
        .map(|c| c.name.clone())
        .collect();

    let problems = table
        .columns()
        .iter()
        .filter_map(|column| {
            // Distinct values, first-seen order
            let values: IndexSet<&str> = column
                .cells
                .iter()
                .filter_map(|c| c.as_str())
                .filter(|s| looks_unnormalized(s))
                .collect();
            (!values.is_empty()).then(|| ProblemColumn {
                column: column.name.clone(),
                values: values.into_iter().map(str::to_string).collect(),
            })
        })
        .collect();

    DatasetValidation {
        dataset,
        rows: table.row_count(),
        columns: table.column_count(),
        missing_values: table.null_count(),
        numeric_columns,
        problems,
    }
}

/// Inspect every present dataset and log the findings
pub fn validate_collection(collection: &DatasetCollection) -> ValidationReport {
    let datasets: Vec<DatasetValidation> = collection
        .iter()
        .map(|(dataset, table)| validate_table(dataset, table))
        .collect();

    for validation in &datasets {
        info!(
            dataset = %validation.dataset,
            rows = validation.rows,
            columns = validation.columns,
            missing = validation.missing_values,
            numeric = ?validation.numeric_columns,
            "validated"
        );
        for problem in &validation.problems {
            warn!(
                dataset = %validation.dataset,
                column = %problem.column,
                values = ?problem.values,
                "still problematic"
            );
        }
    }

    ValidationReport { datasets }
}
