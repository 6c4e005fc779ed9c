//! Per-dataset cleaning plans and the pass that applies them

use tracing::{debug, info, warn};

use crate::model::{Dataset, DatasetCollection, Table};

use super::normalize::{apply_to_column, replace_sentinel_in_place, Normalizer, NA_SENTINEL};

/// Canonical name for the deaths percentage column across tables
pub const PERCENT_OF_DEATHS: &str = "Percent of deaths";

const PERCENTAGE_OF_DEATHS: &str = "Percentage of deaths";
const PERCENT_OF_CASES: &str = "Percent of cases";
const COUNT_OF_DEATHS: &str = "Count of deaths";

/// One declared cleaning operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleaningStep {
    /// Apply a normalizer to every cell of a column
    Normalize {
        column: &'static str,
        normalizer: Normalizer,
    },
    /// Replace a sentinel anywhere in the table with the missing marker
    ReplaceSentinel { sentinel: &'static str },
    /// Rename a column for cross-table consistency
    Rename {
        from: &'static str,
        to: &'static str,
    },
}

impl std::fmt::Display for CleaningStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleaningStep::Normalize { column, normalizer } => {
                write!(f, "{} on '{}'", normalizer, column)
            }
            CleaningStep::ReplaceSentinel { sentinel } => write!(f, "replace '{}'", sentinel),
            CleaningStep::Rename { from, to } => write!(f, "rename '{}' -> '{}'", from, to),
        }
    }
}

/// The fixed sequence of steps for a dataset
pub fn cleaning_plan(dataset: Dataset) -> Vec<CleaningStep> {
    use CleaningStep::{Normalize, ReplaceSentinel, Rename};

    let unify_deaths = Rename {
        from: PERCENTAGE_OF_DEATHS,
        to: PERCENT_OF_DEATHS,
    };

    match dataset {
        Dataset::CasesByAge | Dataset::CasesByRace => Vec::new(),
        Dataset::CasesBySex => vec![
            Normalize {
                column: PERCENT_OF_CASES,
                normalizer: Normalizer::Approx,
            },
            ReplaceSentinel {
                sentinel: NA_SENTINEL,
            },
        ],
        Dataset::DeathsBySex => vec![
            Normalize {
                column: COUNT_OF_DEATHS,
                normalizer: Normalizer::Range,
            },
            Normalize {
                column: PERCENTAGE_OF_DEATHS,
                normalizer: Normalizer::Approx,
            },
            ReplaceSentinel {
                sentinel: NA_SENTINEL,
            },
            unify_deaths,
        ],
        Dataset::DeathsByAge => vec![
            Normalize {
                column: PERCENTAGE_OF_DEATHS,
                normalizer: Normalizer::Approx,
            },
            unify_deaths,
        ],
        Dataset::DeathsByRace => vec![unify_deaths],
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    /// The step's column was not in the table
    Skipped { reason: String },
}

/// What happened to one dataset during cleaning
#[derive(Debug, Clone)]
pub struct DatasetCleaning {
    pub dataset: Dataset,
    pub steps: Vec<(CleaningStep, StepOutcome)>,
}

/// Outcome of a cleaning pass over a collection
#[derive(Debug, Clone, Default)]
pub struct CleaningReport {
    pub cleaned: Vec<DatasetCleaning>,
    /// Datasets that were not loaded
    pub missing: Vec<Dataset>,
}

impl CleaningReport {
    /// Number of steps skipped because a column was absent
    pub fn skipped_steps(&self) -> usize {
        self.cleaned
            .iter()
            .flat_map(|d| &d.steps)
            .filter(|(_, outcome)| matches!(outcome, StepOutcome::Skipped { .. }))
            .count()
    }
}

/// Apply one step to a table. Missing columns are reported, never fatal.
pub fn apply_step(table: &mut Table, step: &CleaningStep) -> StepOutcome {
    match step {
        CleaningStep::Normalize { column, normalizer } => {
            let Some(index) = table.column_index(column) else {
                return StepOutcome::Skipped {
                    reason: format!("column '{}' not found", column),
                };
            };
            let cleaned = apply_to_column(&table.columns()[index], |c| normalizer.apply(c));
            match table.replace_column(index, cleaned) {
                Ok(()) => StepOutcome::Applied,
                Err(e) => StepOutcome::Skipped {
                    reason: e.to_string(),
                },
            }
        }
        CleaningStep::ReplaceSentinel { sentinel } => {
            let replaced = replace_sentinel_in_place(table, sentinel);
            debug!(sentinel, replaced, "replaced sentinel values");
            StepOutcome::Applied
        }
        CleaningStep::Rename { from, to } => {
            if table.column_index(from).is_none() {
                return StepOutcome::Skipped {
                    reason: format!("column '{}' not found", from),
                };
            }
            match table.rename_column(from, to) {
                Ok(()) => StepOutcome::Applied,
                Err(e) => StepOutcome::Skipped {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Run every dataset's cleaning plan over the collection in place
pub fn clean_collection(collection: &mut DatasetCollection) -> CleaningReport {
    let mut report = CleaningReport::default();

    for dataset in Dataset::ALL {
        let Some(table) = collection.get_mut(dataset) else {
            warn!(dataset = %dataset, "dataset not loaded, skipping cleaning");
            report.missing.push(dataset);
            continue;
        };

        let mut steps = Vec::new();
        for step in cleaning_plan(dataset) {
            let outcome = apply_step(table, &step);
            match &outcome {
                StepOutcome::Applied => debug!(dataset = %dataset, step = %step, "applied"),
                StepOutcome::Skipped { reason } => {
                    warn!(dataset = %dataset, step = %step, %reason, "cleaning step skipped")
                }
            }
            steps.push((step, outcome));
        }

        info!(dataset = %dataset, steps = steps.len(), "{} cleaned", dataset.label());
        report.cleaned.push(DatasetCleaning { dataset, steps });
    }

    report
}
