//! Colored terminal summary for the CLI

use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::diff::CompareResult;

/// Renders a short run summary: status line, row counts, per-column table
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, result: &CompareResult, writer: &mut dyn WriteColor) -> std::io::Result<()> {
        self.write_status(result, writer)?;

        let stats = &result.stats;
        writeln!(
            writer,
            "Rows: {} matched, {} only in {}, {} only in {} (out of {} / {})",
            stats.matched,
            stats.only_a,
            result.summary.label_a,
            stats.only_b,
            result.summary.label_b,
            stats.rows_a,
            stats.rows_b
        )?;
        writeln!(writer)?;
        writeln!(writer, "{}", self.counts_table(result))?;
        writeln!(writer)?;
        writeln!(writer, "Report:  {}", result.output_path.display())?;
        writeln!(writer, "Summary: {}", result.summary_path.display())?;
        Ok(())
    }

    fn write_status(&self, result: &CompareResult, writer: &mut dyn WriteColor) -> std::io::Result<()> {
        let (color, message) = if result.stats.has_differences() {
            (
                Color::Yellow,
                format!("{} rows with differences", result.stats.rows_with_differences),
            )
        } else {
            (Color::Green, "No differences found.".to_string())
        };
        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        writeln!(writer, "{}", message)?;
        writer.reset()
    }

    fn counts_table(&self, result: &CompareResult) -> String {
        let mut builder = Builder::default();
        builder.push_record(["column", "differences"]);
        for (column, count) in &result.summary.counts {
            builder.push_record([column.clone(), count.to_string()]);
        }
        let mut table = builder.build();
        table.with(Style::rounded());
        table.to_string()
    }
}
