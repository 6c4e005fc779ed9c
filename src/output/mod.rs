//! Terminal rendering of run results

mod terminal;

use termcolor::{ColorChoice, StandardStream};

use crate::error::Result;
use crate::pipeline::RunReport;

pub use terminal::TerminalOutput;

/// Render a run report to stdout
pub fn render_to_stdout(report: &RunReport, color_choice: ColorChoice) -> Result<()> {
    let mut stdout = StandardStream::stdout(color_choice);
    TerminalOutput::new().render(report, &mut stdout)
}
