//! CSV report writers

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use csv::Writer;

use crate::diff::{DiffReport, SummaryReport};
use crate::error::{CompareError, Result};

/// Write the difference report; an empty report still gets its header
pub fn write_diff_report(report: &DiffReport, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(report.headers())
        .map_err(|e| CompareError::csv(path, e))?;
    for row in &report.rows {
        writer
            .write_record(report.record(row))
            .map_err(|e| CompareError::csv(path, e))?;
    }
    writer.flush().map_err(|e| CompareError::io(path, e))
}

/// Write the per-column counts and unique-row lists
pub fn write_summary_report(summary: &SummaryReport, path: &Path) -> Result<()> {
    let records = summary.records()?;
    let mut writer = create_writer(path)?;
    writer
        .write_record(SummaryReport::headers())
        .map_err(|e| CompareError::csv(path, e))?;
    for record in &records {
        writer
            .write_record(record)
            .map_err(|e| CompareError::csv(path, e))?;
    }
    writer.flush().map_err(|e| CompareError::io(path, e))
}

/// Open the destination; failing to create the file is an I/O error
fn create_writer(path: &Path) -> Result<Writer<BufWriter<File>>> {
    let file = File::create(path).map_err(|e| CompareError::io(path, e))?;
    Ok(Writer::from_writer(BufWriter::new(file)))
}
