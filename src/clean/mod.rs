//! Value normalization, per-dataset cleaning plans and validation

mod normalize;
mod plan;
mod validate;

pub use normalize::{
    apply_to_column, normalize_approx, normalize_range, rename_column, replace_sentinel,
    replace_sentinel_in_place, Normalizer, APPROX_PREFIX, NA_SENTINEL, RANGE_SEPARATOR,
};
pub use plan::{
    apply_step, clean_collection, cleaning_plan, CleaningReport, CleaningStep, DatasetCleaning,
    StepOutcome, PERCENT_OF_DEATHS,
};
pub use validate::{
    looks_unnormalized, validate_collection, validate_table, DatasetValidation, ProblemColumn,
    ValidationReport,
};
