//! CSV file parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::config::{CompareConfig, InputFormat};
use crate::error::{CompareError, Result};
use crate::model::{CellValue, Column, Table};

use super::Parser;

/// Parser for delimited text with a header row
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &CompareConfig) -> Result<Table> {
        let file = File::open(path).map_err(|e| CompareError::io(path, e))?;
        let reader = BufReader::new(file);
        let mut csv_reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(config.delimiter)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| CompareError::csv(path, e))?
            .clone();

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(name, i))
            .collect();

        let mut table = Table::new(columns);

        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| CompareError::csv(path, e))?;
            if record.len() > table.column_count() {
                return Err(CompareError::RowTooLong {
                    path: path.to_path_buf(),
                    line: line_num + 2,
                    fields: record.len(),
                    columns: table.column_count(),
                });
            }
            let cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            table.add_row(cells, line_num + 2); // +2 for 1-indexing and header
        }

        debug!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "parsed delimited file"
        );
        Ok(table)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Csv
    }
}

/// Empty fields are missing; everything else is kept verbatim
fn parse_cell_value(s: &str) -> CellValue {
    if s.is_empty() {
        CellValue::Null
    } else {
        CellValue::from(s)
    }
}
