//! Excel file parser (xlsx, xls, ods)

use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::config::{CompareConfig, InputFormat};
use crate::error::{CompareError, Result};
use crate::model::{CellValue, Column, Table};

use super::Parser;

/// Parser for Excel files
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, path: &Path, config: &CompareConfig) -> Result<Table> {
        let excel_error = |message: String| CompareError::Excel {
            path: path.to_path_buf(),
            message,
        };

        // calamine folds I/O failures into its own error; surface them as I/O
        File::open(path).map_err(|e| CompareError::io(path, e))?;
        let mut workbook = open_workbook_auto(path).map_err(|e| excel_error(e.to_string()))?;

        // Get sheet name
        let sheets = workbook.sheet_names();
        let sheet_name = match config.sheet_name {
            Some(ref name) if sheets.contains(name) => name.clone(),
            Some(ref name) => {
                return Err(CompareError::Config(format!(
                    "sheet '{}' not found in {}",
                    name,
                    path.display()
                )))
            }
            None => sheets
                .first()
                .cloned()
                .ok_or_else(|| excel_error("No sheets found in workbook".to_string()))?,
        };

        let range: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| excel_error(format!("Failed to read sheet {}: {}", sheet_name, e)))?;

        let table = parse_range(&range).ok_or_else(|| excel_error(format!("Sheet {} is empty", sheet_name)))?;
        debug!(
            path = %path.display(),
            sheet = %sheet_name,
            columns = table.column_count(),
            rows = table.row_count(),
            "parsed workbook sheet"
        );
        Ok(table)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Excel
    }
}

/// First row is the header; `None` for an empty sheet
fn parse_range(range: &Range<Data>) -> Option<Table> {
    let mut rows = range.rows();
    let header_row = rows.next()?;
    let columns: Vec<Column> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell_text(cell).unwrap_or_default();
            Column::new(if name.is_empty() { format!("Column{}", i + 1) } else { name }, i)
        })
        .collect();

    let mut table = Table::new(columns);
    for (line_num, row) in rows.enumerate() {
        let cells = row.iter().map(|cell| CellValue::from(cell_text(cell))).collect();
        table.add_row(cells, line_num + 2); // +2 for 1-indexing and header
    }
    Some(table)
}

/// Display text of a cell; `None` for empty cells and empty strings
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(format_float(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_serial_date(dt.as_f64())),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("#{:?}", e)),
    }
}

/// Whole floats lose the fraction so `5.0` reads like the `5` a user typed
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

/// Excel serial days since 1899-12-30, rendered `YYYY-MM-DD HH:MM:SS`.
///
/// Serials outside chrono's range fall back to the raw number.
fn format_serial_date(serial: f64) -> String {
    let millis = (serial * 86_400_000.0).round() as i64;
    let datetime = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .zip(Duration::try_milliseconds(millis))
        .and_then(|(epoch, offset)| epoch.checked_add_signed(offset));
    match datetime {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => serial.to_string(),
    }
}
