//! Row alignment: full outer join on alignment keys

use indexmap::IndexMap;

use crate::model::{AlignmentKey, Row, Table};

/// Where a joined row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Matched,
    OnlyA,
    OnlyB,
}

impl Provenance {
    /// Tag written to the `_merge` column
    pub fn label(&self, label_a: &str, label_b: &str) -> String {
        match self {
            Provenance::Matched => "matched".to_string(),
            Provenance::OnlyA => format!("{}_ONLY", label_a),
            Provenance::OnlyB => format!("{}_ONLY", label_b),
        }
    }
}

/// One row of the outer join
#[derive(Debug, Clone)]
pub struct AlignedRow<'a> {
    pub key: AlignmentKey,
    pub row_a: Option<&'a Row>,
    pub row_b: Option<&'a Row>,
}

impl AlignedRow<'_> {
    pub fn provenance(&self) -> Provenance {
        match (self.row_a, self.row_b) {
            (Some(_), Some(_)) => Provenance::Matched,
            (Some(_), None) => Provenance::OnlyA,
            (None, _) => Provenance::OnlyB,
        }
    }

    /// Source row number in table A, 0 when absent
    pub fn row_number_a(&self) -> usize {
        self.row_a.map_or(0, |r| r.source_line)
    }

    /// Source row number in table B, 0 when absent
    pub fn row_number_b(&self) -> usize {
        self.row_b.map_or(0, |r| r.source_line)
    }
}

/// Row matcher using hash-based lookup on alignment keys
pub struct RowMatcher<'a> {
    table_b: &'a Table,
    index_b: IndexMap<AlignmentKey, usize>,
}

impl<'a> RowMatcher<'a> {
    /// Index table B by alignment key; `keys_b[i]` belongs to `table_b.rows[i]`
    pub fn new(table_b: &'a Table, keys_b: Vec<AlignmentKey>) -> Self {
        let mut index_b = IndexMap::with_capacity(keys_b.len());
        for (row_idx, key) in keys_b.into_iter().enumerate() {
            let previous = index_b.insert(key, row_idx);
            debug_assert!(previous.is_none(), "alignment keys must be unique per table");
        }
        Self { table_b, index_b }
    }

    /// Full outer join of table A against the indexed table B.
    ///
    /// Yields A's rows in source order (matched or A-only), then B's
    /// unmatched rows in source order. Every input row lands in exactly
    /// one joined row. Output is not sorted by key: keys are compared as
    /// text, and a text sort would put `"10"` before `"2"`.
    pub fn match_rows(self, table_a: &'a Table, keys_a: Vec<AlignmentKey>) -> Vec<AlignedRow<'a>> {
        let mut joined = Vec::with_capacity(table_a.row_count() + self.index_b.len());
        let mut matched_b = vec![false; self.index_b.len()];

        for (row_a, key) in table_a.rows.iter().zip(keys_a) {
            let row_b = match self.index_b.get_full(&key) {
                Some((pos, _, &row_idx)) => {
                    matched_b[pos] = true;
                    self.table_b.rows.get(row_idx)
                }
                None => None,
            };
            joined.push(AlignedRow {
                key,
                row_a: Some(row_a),
                row_b,
            });
        }

        for ((key, row_idx), matched) in self.index_b.into_iter().zip(matched_b) {
            if matched {
                continue;
            }
            joined.push(AlignedRow {
                key,
                row_a: None,
                row_b: self.table_b.rows.get(row_idx),
            });
        }

        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeyBuilder;

    fn join<'a>(a: &'a Table, b: &'a Table) -> Vec<AlignedRow<'a>> {
        let ids = vec!["id".to_string()];
        let keys_a = KeyBuilder::for_table(a, &ids, "a").unwrap().alignment_keys(a);
        let keys_b = KeyBuilder::for_table(b, &ids, "b").unwrap().alignment_keys(b);
        RowMatcher::new(b, keys_b).match_rows(a, keys_a)
    }

    #[test]
    fn test_duplicate_keys_align_by_occurrence() {
        let a = Table::from_rows(["id", "v"], [["k", "1"], ["k", "2"], ["k", "3"]]);
        let b = Table::from_rows(["id", "v"], [["k", "1"], ["k", "2"]]);
        let joined = join(&a, &b);

        assert_eq!(joined.len(), 3);
        let provenance: Vec<_> = joined.iter().map(|r| r.provenance()).collect();
        assert_eq!(
            provenance,
            vec![Provenance::Matched, Provenance::Matched, Provenance::OnlyA]
        );
        assert_eq!(joined[1].row_number_a(), 3);
        assert_eq!(joined[1].row_number_b(), 3);
        assert_eq!(joined[2].row_number_b(), 0);
        assert_eq!(joined[2].key.seq(), 2);
    }

    #[test]
    fn test_row_conservation() {
        let a = Table::from_rows(["id"], [["1"], ["2"], ["3"], ["3"]]);
        let b = Table::from_rows(["id"], [["3"], ["4"], ["1"]]);
        let joined = join(&a, &b);

        let matched = joined
            .iter()
            .filter(|r| r.provenance() == Provenance::Matched)
            .count();
        assert_eq!(matched, 2);
        assert_eq!(joined.len(), a.row_count() + b.row_count() - matched);

        let mut lines_a: Vec<_> = joined.iter().filter_map(|r| r.row_a).map(|r| r.source_line).collect();
        let mut lines_b: Vec<_> = joined.iter().filter_map(|r| r.row_b).map(|r| r.source_line).collect();
        lines_a.sort_unstable();
        lines_b.sort_unstable();
        assert_eq!(lines_a, vec![2, 3, 4, 5]);
        assert_eq!(lines_b, vec![2, 3, 4]);
    }

    #[test]
    fn test_b_only_rows_follow_source_order() {
        let a = Table::from_rows(["id"], [["1"]]);
        let b = Table::from_rows(["id"], [["9"], ["1"], ["7"]]);
        let joined = join(&a, &b);

        let only_b: Vec<_> = joined
            .iter()
            .filter(|r| r.provenance() == Provenance::OnlyB)
            .map(|r| r.row_number_b())
            .collect();
        assert_eq!(only_b, vec![2, 4]);
        assert_eq!(joined[1].row_number_a(), 0);
    }

    #[test]
    fn test_provenance_labels() {
        assert_eq!(Provenance::Matched.label("a.csv", "b.csv"), "matched");
        assert_eq!(Provenance::OnlyA.label("a.csv", "b.csv"), "a.csv_ONLY");
        assert_eq!(Provenance::OnlyB.label("a.csv", "b.csv"), "b.csv_ONLY");
    }
}
