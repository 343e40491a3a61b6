//! Difference and summary report structures

use crate::error::Result;
use crate::model::AlignmentKey;

use super::cell_diff::DiffCell;
use super::row_diff::Provenance;

/// One row of the difference report
#[derive(Debug, Clone)]
pub struct DiffRow {
    pub key: AlignmentKey,
    /// One cell per compared column, in `DiffReport::compared_columns` order
    pub cells: Vec<DiffCell>,
    pub row_number_a: usize,
    pub row_number_b: usize,
    pub provenance: Provenance,
}

impl DiffRow {
    pub fn has_difference(&self) -> bool {
        self.provenance != Provenance::Matched || self.cells.iter().any(DiffCell::is_difference)
    }
}

/// Joined rows with at least one difference or a missing counterpart
#[derive(Debug, Clone)]
pub struct DiffReport {
    pub identifier_columns: Vec<String>,
    pub compared_columns: Vec<String>,
    pub rows: Vec<DiffRow>,
    pub label_a: String,
    pub label_b: String,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header: identifier columns and `seq`, the `<field>_diff` columns,
    /// both row-number columns, then `_merge`
    pub fn headers(&self) -> Vec<String> {
        let mut headers = self.identifier_columns.clone();
        headers.push("seq".to_string());
        headers.extend(self.compared_columns.iter().map(|c| format!("{}_diff", c)));
        headers.push("row_number_file1".to_string());
        headers.push("row_number_file2".to_string());
        headers.push("_merge".to_string());
        headers
    }

    /// Render one row in header order
    pub fn record(&self, row: &DiffRow) -> Vec<String> {
        let mut record = row.key.identifier().parts().to_vec();
        record.push(row.key.seq().to_string());
        record.extend(row.cells.iter().map(ToString::to_string));
        record.push(row.row_number_a.to_string());
        record.push(row.row_number_b.to_string());
        record.push(row.provenance.label(&self.label_a, &self.label_b));
        record
    }

    /// Look up the cell for a compared column in a row
    pub fn cell<'r>(&self, row: &'r DiffRow, column: &str) -> Option<&'r DiffCell> {
        let idx = self.compared_columns.iter().position(|c| c == column)?;
        row.cells.get(idx)
    }
}

/// Per-column difference counts plus the alignment keys unique to each side
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// (column name, number of joined rows where it differs), in comparison order
    pub counts: Vec<(String, usize)>,
    pub unique_a: Vec<AlignmentKey>,
    pub unique_b: Vec<AlignmentKey>,
    pub label_a: String,
    pub label_b: String,
}

impl SummaryReport {
    pub fn headers() -> [&'static str; 2] {
        ["column_name", "num_differences"]
    }

    /// Difference count for a compared column
    pub fn count(&self, column: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, n)| *n)
    }

    /// Rows of the summary file: the counts, then the two unique-row lists
    pub fn records(&self) -> Result<Vec<[String; 2]>> {
        let mut records: Vec<[String; 2]> = self
            .counts
            .iter()
            .map(|(name, n)| [name.clone(), n.to_string()])
            .collect();
        records.push([
            format!("{}_unique_rows", self.label_a),
            serde_json::to_string(&self.unique_a)?,
        ]);
        records.push([
            format!("{}_unique_rows", self.label_b),
            serde_json::to_string(&self.unique_b)?,
        ]);
        Ok(records)
    }
}

/// Row counts for one comparison
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompareStats {
    pub rows_a: usize,
    pub rows_b: usize,
    pub matched: usize,
    pub only_a: usize,
    pub only_b: usize,
    pub rows_with_differences: usize,
}

impl CompareStats {
    pub fn has_differences(&self) -> bool {
        self.rows_with_differences > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdentifierKey;

    fn key(id: &str, seq: usize) -> AlignmentKey {
        AlignmentKey(IdentifierKey(vec![id.to_string()]), seq)
    }

    #[test]
    fn test_diff_record_layout() {
        let report = DiffReport {
            identifier_columns: vec!["id".into()],
            compared_columns: vec!["val".into(), "qty".into()],
            rows: Vec::new(),
            label_a: "a.csv".into(),
            label_b: "b.csv".into(),
        };
        let row = DiffRow {
            key: key("1", 0),
            cells: vec![
                DiffCell::Changed {
                    a: Some("5".into()),
                    b: None,
                },
                DiffCell::NoDifference,
            ],
            row_number_a: 2,
            row_number_b: 0,
            provenance: Provenance::OnlyA,
        };

        assert_eq!(
            report.headers(),
            vec!["id", "seq", "val_diff", "qty_diff", "row_number_file1", "row_number_file2", "_merge"]
        );
        assert_eq!(
            report.record(&row),
            vec!["1", "0", "5 | --", "--", "2", "0", "a.csv_ONLY"]
        );
        assert_eq!(report.cell(&row, "qty"), Some(&DiffCell::NoDifference));
    }

    #[test]
    fn test_summary_records() {
        let summary = SummaryReport {
            counts: vec![("val".into(), 3)],
            unique_a: vec![key("7", 0), key("7", 1)],
            unique_b: Vec::new(),
            label_a: "a.csv".into(),
            label_b: "b.csv".into(),
        };
        let records = summary.records().unwrap();
        assert_eq!(records[0], ["val".to_string(), "3".to_string()]);
        assert_eq!(records[1][0], "a.csv_unique_rows");
        assert_eq!(records[1][1], r#"[["7",0],["7",1]]"#);
        assert_eq!(records[2][1], "[]");
        assert_eq!(summary.count("val"), Some(3));
        assert_eq!(summary.count("other"), None);
    }
}
