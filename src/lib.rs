//! datacompare - field-level comparison of two tabular datasets
//!
//! Rows of two CSV or Excel inputs are aligned on a set of identifier
//! columns (duplicate keys pair up by occurrence order), every shared
//! column is compared by exact text, and two CSV reports are written: the
//! differing rows, and per-column difference counts with the rows unique
//! to each side.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::{CompareConfig, InputFormat};
pub use diff::{compare, compute_diff, CompareResult, DiffReport, SummaryReport};
pub use error::{CompareError, Result};
pub use model::Table;
