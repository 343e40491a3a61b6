//! Writing comparison reports

mod report;
mod terminal;

use std::path::{Path, PathBuf};

use crate::diff::{DiffReport, SummaryReport};
use crate::error::Result;

pub use report::{write_diff_report, write_summary_report};
pub use terminal::TerminalOutput;

/// Sibling of `output_path` whose file name is prefixed with `summary_`
pub fn summary_path(output_path: &Path) -> PathBuf {
    let file_name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_path.with_file_name(format!("summary_{}", file_name))
}

/// Write the difference report to `output_path` and the summary next to it.
///
/// Returns the summary path.
pub fn write_reports(diff: &DiffReport, summary: &SummaryReport, output_path: &Path) -> Result<PathBuf> {
    let summary_path = summary_path(output_path);
    write_diff_report(diff, output_path)?;
    write_summary_report(summary, &summary_path)?;
    Ok(summary_path)
}
