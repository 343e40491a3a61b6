//! Parser layer for reading the supported tabular formats

mod csv;
mod excel;

use std::path::Path;

use crate::config::{CompareConfig, InputFormat};
use crate::error::{CompareError, Result};
use crate::model::Table;

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table whose first data row is numbered 2
    fn parse(&self, path: &Path, config: &CompareConfig) -> Result<Table>;

    /// The format tag this parser reads
    fn format(&self) -> InputFormat;
}

/// Factory selecting a parser by the declared input format
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(ExcelParser)],
        }
    }

    /// Get the parser for a format
    pub fn get_parser(&self, format: InputFormat) -> Result<&dyn Parser> {
        self.parsers
            .iter()
            .find(|p| p.format() == format)
            .map(|p| p.as_ref())
            .ok_or_else(|| CompareError::Config(format!("Unsupported file format: {}", format)))
    }

    /// Parse a file using the parser for the configured format
    pub fn parse(&self, path: &Path, config: &CompareConfig) -> Result<Table> {
        let parser = self.get_parser(config.format)?;
        parser.parse(path, config)
    }
}
