//! Configuration handling for tabclean

use std::path::PathBuf;

/// Directory the cleaned tables are written to
pub const OUTPUT_DIR: &str = "clean_cdc_datasets";

/// File name of the per-table export summary
pub const SUMMARY_FILE: &str = "export_summary.csv";

/// File name of the BI metadata document
pub const METADATA_FILE: &str = "dataset_metadata.json";

/// Which export driver to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportDriver {
    /// All three write strategies, no metadata document
    #[default]
    Robust,
    /// Primary strategy only, plus the metadata document
    Simple,
}

/// Configuration for a clean-and-export run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `<dataset>.csv` input files
    pub input_dir: PathBuf,
    /// Directory the cleaned CSV files are written to
    pub output_dir: PathBuf,
    /// Export driver
    pub driver: ExportDriver,
    /// Export the tables as loaded, without running the cleaning plans
    pub skip_clean: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from(OUTPUT_DIR),
            driver: ExportDriver::default(),
            skip_clean: false,
        }
    }
}

impl Config {
    /// Create a new Config reading from `input_dir`
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Set the export driver
    pub fn with_driver(mut self, driver: ExportDriver) -> Self {
        self.driver = driver;
        self
    }

    /// Skip the cleaning pass
    pub fn with_skip_clean(mut self, skip: bool) -> Self {
        self.skip_clean = skip;
        self
    }

    /// Path of the summary artifact
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }

    /// Path of the metadata artifact
    pub fn metadata_path(&self) -> PathBuf {
        self.output_dir.join(METADATA_FILE)
    }
}
