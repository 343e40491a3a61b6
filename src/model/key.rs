//! Identifier and alignment key handling

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::table::{CellValue, Table};
use crate::error::{CompareError, Result};

/// Ordered tuple of identifier column values for one row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierKey(pub Vec<String>);

impl IdentifierKey {
    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for IdentifierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("|"))
    }
}

/// Identifier key plus the 0-based occurrence index of that key in its table.
///
/// Unique within one table by construction, so it is the join key.
/// Serializes flat as `[parts..., seq]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlignmentKey(pub IdentifierKey, pub usize);

impl Serialize for AlignmentKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let parts = self.0.parts();
        let mut seq = serializer.serialize_seq(Some(parts.len() + 1))?;
        for part in parts {
            seq.serialize_element(part)?;
        }
        seq.serialize_element(&self.1)?;
        seq.end()
    }
}

impl AlignmentKey {
    pub fn identifier(&self) -> &IdentifierKey {
        &self.0
    }

    /// Sequence discriminator
    pub fn seq(&self) -> usize {
        self.1
    }
}

impl std::fmt::Display for AlignmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.0, self.1)
    }
}

/// Builder for computing identifier keys from a table's rows
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    column_indices: Vec<usize>,
}

impl KeyBuilder {
    /// Resolve identifier column names against a table.
    ///
    /// Fails with a schema error naming the first column the table lacks.
    pub fn for_table(table: &Table, names: &[String], source_label: &str) -> Result<Self> {
        let column_indices = names
            .iter()
            .map(|name| {
                table
                    .column_index(name)
                    .ok_or_else(|| CompareError::MissingIdentifier {
                        column: name.clone(),
                        source_path: source_label.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { column_indices })
    }

    /// Build the identifier key for one row; null components render empty
    pub fn build_key(&self, cells: &[CellValue]) -> IdentifierKey {
        IdentifierKey(
            self.column_indices
                .iter()
                .map(|&i| cells.get(i).map(|c| c.display().into_owned()).unwrap_or_default())
                .collect(),
        )
    }

    /// Get the column indices
    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// Compute the alignment key of every row, in row order.
    ///
    /// The Nth occurrence of an identifier key gets sequence N-1.
    pub fn alignment_keys(&self, table: &Table) -> Vec<AlignmentKey> {
        let mut occurrences: FxHashMap<IdentifierKey, usize> = FxHashMap::default();
        table
            .rows
            .iter()
            .map(|row| {
                let key = self.build_key(&row.cells);
                let seq = occurrences.entry(key.clone()).or_insert(0);
                let aligned = AlignmentKey(key, *seq);
                *seq += 1;
                aligned
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sequence_numbers_per_key() {
        let table = Table::from_rows(
            ["id", "kind", "val"],
            [
                ["1", "a", "x"],
                ["2", "a", "y"],
                ["1", "a", "z"],
                ["1", "b", "w"],
                ["1", "a", "v"],
            ],
        );
        let builder = KeyBuilder::for_table(&table, &ids(&["id", "kind"]), "t.csv").unwrap();
        let seqs: Vec<usize> = builder.alignment_keys(&table).iter().map(|k| k.seq()).collect();
        assert_eq!(seqs, vec![0, 0, 1, 0, 2]);
    }

    #[test]
    fn test_missing_identifier_column() {
        let table = Table::from_rows(["id", "val"], [["1", "x"]]);
        let err = KeyBuilder::for_table(&table, &ids(&["missing_col"]), "t.csv").unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("missing_col"));
    }

    #[test]
    fn test_alignment_key_serializes_flat() {
        let key = AlignmentKey(IdentifierKey(ids(&["3", "a"])), 1);
        assert_eq!(serde_json::to_string(&key).unwrap(), r#"["3","a",1]"#);
    }
}
