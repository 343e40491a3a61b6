//! Configuration handling for datacompare

use std::path::PathBuf;

use crate::error::CompareError;

/// Declared format of both input files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// Delimited text with a header row
    #[default]
    Csv,
    /// Spreadsheet workbook with a header row
    Excel,
}

impl std::str::FromStr for InputFormat {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "excel" | "xlsx" | "xls" => Ok(InputFormat::Excel),
            _ => Err(CompareError::Config(format!("Unsupported file format: {}", s))),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Excel => write!(f, "excel"),
        }
    }
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// First input (table A)
    pub source_a: PathBuf,
    /// Second input (table B)
    pub source_b: PathBuf,
    /// Destination of the difference report
    pub output_path: PathBuf,
    /// Columns forming the identifier key, in order
    pub identifier_columns: Vec<String>,
    /// Format shared by both inputs
    pub format: InputFormat,
    /// For Excel files: which sheet to compare
    pub sheet_name: Option<String>,
    /// Field delimiter for delimited-text input
    pub delimiter: u8,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            source_a: PathBuf::new(),
            source_b: PathBuf::new(),
            output_path: PathBuf::new(),
            identifier_columns: Vec::new(),
            format: InputFormat::default(),
            sheet_name: None,
            delimiter: b',',
        }
    }
}

impl CompareConfig {
    /// Create a new config with input and output paths
    pub fn new(
        source_a: impl Into<PathBuf>,
        source_b: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_a: source_a.into(),
            source_b: source_b.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    /// Set identifier columns for row alignment
    pub fn with_identifier_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.identifier_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set input format
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set Excel sheet name
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Set the input field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Label used for provenance tags and unique-row summary entries
    pub fn label_a(&self) -> String {
        self.source_a.display().to_string()
    }

    pub fn label_b(&self) -> String {
        self.source_b.display().to_string()
    }

    /// Reject configurations that cannot run regardless of input content
    pub fn validate(&self) -> Result<(), CompareError> {
        if self.identifier_columns.is_empty() {
            return Err(CompareError::Config(
                "at least one identifier column is required".to_string(),
            ));
        }
        Ok(())
    }
}
