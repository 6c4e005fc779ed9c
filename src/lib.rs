//! tabclean - clean and export the CDC COVID-19 demographic tables
//!
//! Normalizes range text ("436120 - 436129"), below-threshold text ("<0.1") and
//! "N/A" sentinels into numbers or missing values, harmonizes column names across
//! the six tables, and exports them as CSV with fallback write strategies.

pub mod clean;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::{Config, ExportDriver};
pub use error::{Error, Result, SchemaError};
pub use export::{ExportRecord, ExportStatus, ExportSummary, Exporter, WriteStrategy};
pub use model::{CellValue, Column, Dataset, DatasetCollection, Table};
pub use pipeline::{process, run, RunReport};
