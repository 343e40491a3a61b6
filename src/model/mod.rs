//! Data model for tabular data representation

mod key;
mod table;

pub use key::{AlignmentKey, IdentifierKey, KeyBuilder};
pub use table::{CellValue, Column, Row, Table};
