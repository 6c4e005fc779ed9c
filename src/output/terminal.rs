//! Colored terminal output

use tabled::settings::Style;
use tabled::{Table as TextTable, Tabled};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::clean::{CleaningReport, StepOutcome, ValidationReport};
use crate::error::Result;
use crate::export::{ExportRecord, ExportReport, ExportStatus};
use crate::pipeline::RunReport;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Dataset")]
    dataset: String,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Columns")]
    columns: usize,
    #[tabled(rename = "File_Size_KB")]
    file_size_kb: f64,
    #[tabled(rename = "Status")]
    status: ExportStatus,
}

impl From<&ExportRecord> for SummaryRow {
    fn from(record: &ExportRecord) -> Self {
        Self {
            dataset: record.dataset.clone(),
            rows: record.rows,
            columns: record.columns,
            file_size_kb: record.file_size_kb,
            status: record.status,
        }
    }
}

/// Terminal output with colors
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &RunReport, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(report, writer)?;
        if let Some(cleaning) = &report.cleaning {
            self.write_cleaning(cleaning, writer)?;
        }
        self.write_validation(&report.validation, writer)?;
        self.write_export(&report.export, writer)?;
        Ok(())
    }

    fn write_header(&self, report: &RunReport, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            writer,
            " tabclean: {} datasets → {}",
            report.export.summary.total(),
            report
                .export
                .summary_path
                .parent()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_cleaning(&self, cleaning: &CleaningReport, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "Cleaning:")?;
        for dataset in &cleaning.cleaned {
            let applied = dataset
                .steps
                .iter()
                .filter(|(_, outcome)| *outcome == StepOutcome::Applied)
                .count();
            writeln!(
                writer,
                "  {}: {}/{} steps applied",
                dataset.dataset.label(),
                applied,
                dataset.steps.len()
            )?;
            for (step, outcome) in &dataset.steps {
                if let StepOutcome::Skipped { reason } = outcome {
                    let line = format!("    skipped {}: {}", step, reason);
                    self.write_colored(writer, Color::Yellow, &line)?;
                }
            }
        }
        for dataset in &cleaning.missing {
            let line = format!("  {}: not loaded", dataset.label());
            self.write_colored(writer, Color::Yellow, &line)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_validation(
        &self,
        validation: &ValidationReport,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        writeln!(writer, "Data Validation:")?;
        for dataset in &validation.datasets {
            writeln!(
                writer,
                "  {}: {} rows × {} columns, {} missing values",
                dataset.dataset.label(),
                dataset.rows,
                dataset.columns,
                dataset.missing_values
            )?;
            if !dataset.numeric_columns.is_empty() {
                writeln!(writer, "    Numeric columns: {}", dataset.numeric_columns.join(", "))?;
            }
            for problem in &dataset.problems {
                self.write_colored(
                    writer,
                    Color::Yellow,
                    &format!("    Still problematic in {}: {:?}", problem.column, problem.values),
                )?;
            }
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_export(&self, export: &ExportReport, writer: &mut dyn WriteColor) -> Result<()> {
        let summary = &export.summary;

        writeln!(writer, "Export Summary:")?;
        let rows: Vec<SummaryRow> = summary.records.iter().map(SummaryRow::from).collect();
        let mut table = TextTable::new(rows);
        table.with(Style::rounded());
        writeln!(writer, "{}", table)?;
        writeln!(writer)?;

        writeln!(writer, "Total datasets: {}", summary.total())?;
        self.write_colored(
            writer,
            Color::Green,
            &format!("Successful exports: {}", summary.successes()),
        )?;
        let failed_color = if summary.failures() > 0 {
            Color::Red
        } else {
            Color::Green
        };
        self.write_colored(
            writer,
            failed_color,
            &format!("Failed exports: {}", summary.failures()),
        )?;

        if let Some(path) = &export.metadata_path {
            writeln!(writer, "Metadata: {}", path.display())?;
        }

        if !export.files.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Files:")?;
            for file in &export.files {
                writeln!(writer, "  • {} ({:.1}KB)", file.name, file.bytes as f64 / 1024.0)?;
            }
        }
        Ok(())
    }

    fn write_colored(&self, writer: &mut dyn WriteColor, color: Color, line: &str) -> Result<()> {
        writer.set_color(ColorSpec::new().set_fg(Some(color)))?;
        writeln!(writer, "{}", line)?;
        writer.reset()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportSummary, ExportedFile};
    use std::path::PathBuf;
    use termcolor::NoColor;

    fn report() -> RunReport {
        RunReport {
            cleaning: None,
            validation: ValidationReport::default(),
            export: ExportReport {
                summary: ExportSummary {
                    records: vec![
                        ExportRecord {
                            dataset: "cases_by_age".to_string(),
                            rows: 9,
                            columns: 3,
                            file_size_kb: 0.25,
                            status: ExportStatus::Success,
                            strategy: Some("native".to_string()),
                        },
                        ExportRecord {
                            dataset: "deaths_by_age".to_string(),
                            rows: 9,
                            columns: 3,
                            file_size_kb: 0.0,
                            status: ExportStatus::Failed,
                            strategy: None,
                        },
                    ],
                },
                summary_path: PathBuf::from("clean_cdc_datasets/export_summary.csv"),
                metadata_path: None,
                files: vec![ExportedFile {
                    name: "cases_by_age.csv".to_string(),
                    bytes: 512,
                }],
            },
        }
    }

    #[test]
    fn test_render_counts_and_files() {
        let mut out = NoColor::new(Vec::new());
        TerminalOutput::new().render(&report(), &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.contains("Total datasets: 2"));
        assert!(text.contains("Successful exports: 1"));
        assert!(text.contains("Failed exports: 1"));
        assert!(text.contains("deaths_by_age"));
        assert!(text.contains("cases_by_age.csv (0.5KB)"));
    }
}
