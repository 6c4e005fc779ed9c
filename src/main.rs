//! tabclean - clean and export the CDC COVID-19 demographic tables

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use termcolor::ColorChoice;

use tabclean::config::Config;
use tabclean::logging::{init_logging, LogConfig};
use tabclean::output::render_to_stdout;

/// Clean the CDC COVID-19 demographic tables and export them to clean_cdc_datasets/
#[derive(Parser, Debug)]
#[command(name = "tabclean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the <dataset>.csv input files
    #[arg(default_value = ".")]
    input_dir: PathBuf,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig::default().with_ansi(std::io::stderr().is_terminal()));

    let config = Config::new(cli.input_dir.clone());
    let report = tabclean::run(&config)
        .with_context(|| format!("Failed to process {}", cli.input_dir.display()))?;

    let color_choice = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    render_to_stdout(&report, color_choice)?;

    Ok(())
}
