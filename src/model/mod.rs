//! Data model for tabular data representation

mod dataset;
mod schema;
mod table;

pub use dataset::{Dataset, DatasetCollection};
pub use schema::CellType;
pub use table::{CellValue, Column, Table};
