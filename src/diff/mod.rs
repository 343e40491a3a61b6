//! Diff engine for comparing tables

pub mod cell_diff;
mod report;
mod row_diff;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::CompareConfig;
use crate::error::{CompareError, Result};
use crate::model::{KeyBuilder, Table};
use crate::output::write_reports;
use crate::parser::ParserFactory;

pub use cell_diff::{cells_differ, DiffCell, PLACEHOLDER};
pub use report::{CompareStats, DiffReport, DiffRow, SummaryReport};
pub use row_diff::{AlignedRow, Provenance, RowMatcher};

/// A column present in both tables and not part of the identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedColumn {
    pub name: String,
    pub index_a: usize,
    pub index_b: usize,
}

/// Columns to compare, in table A's column order
pub fn shared_columns(table_a: &Table, table_b: &Table, identifier_columns: &[String]) -> Vec<SharedColumn> {
    table_a
        .columns
        .iter()
        .filter(|col| !identifier_columns.contains(&col.name))
        .filter_map(|col| {
            table_b.column_index(&col.name).map(|index_b| SharedColumn {
                name: col.name.clone(),
                index_a: col.index,
                index_b,
            })
        })
        .collect()
}

/// In-memory result of comparing two tables
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub diff: DiffReport,
    pub summary: SummaryReport,
    pub stats: CompareStats,
}

/// Compare two loaded tables.
///
/// Rows are aligned on (identifier key, occurrence index) with a full outer
/// join, then every shared non-identifier column is compared by exact text.
/// Schema problems are reported before any work is done.
pub fn compute_diff(table_a: &Table, table_b: &Table, config: &CompareConfig) -> Result<DiffOutcome> {
    config.validate()?;
    let label_a = config.label_a();
    let label_b = config.label_b();

    let builder_a = KeyBuilder::for_table(table_a, &config.identifier_columns, &label_a)?;
    let builder_b = KeyBuilder::for_table(table_b, &config.identifier_columns, &label_b)?;

    let columns = shared_columns(table_a, table_b, &config.identifier_columns);
    if columns.is_empty() {
        return Err(CompareError::NoSharedColumns {
            source_a: label_a,
            source_b: label_b,
        });
    }
    debug!(
        columns = ?columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "comparing shared columns"
    );

    let matcher = RowMatcher::new(table_b, builder_b.alignment_keys(table_b));
    let joined = matcher.match_rows(table_a, builder_a.alignment_keys(table_a));

    let mut counts = vec![0usize; columns.len()];
    let mut stats = CompareStats {
        rows_a: table_a.row_count(),
        rows_b: table_b.row_count(),
        ..Default::default()
    };
    let mut rows = Vec::new();
    let mut unique_a = Vec::new();
    let mut unique_b = Vec::new();

    for aligned in joined {
        let provenance = aligned.provenance();
        let cells: Vec<DiffCell> = columns
            .iter()
            .zip(counts.iter_mut())
            .map(|(col, count)| {
                let cell = DiffCell::compare(
                    aligned.row_a.and_then(|r| r.get(col.index_a)),
                    aligned.row_b.and_then(|r| r.get(col.index_b)),
                );
                if cell.is_difference() {
                    *count += 1;
                }
                cell
            })
            .collect();

        match provenance {
            Provenance::Matched => stats.matched += 1,
            Provenance::OnlyA => {
                stats.only_a += 1;
                unique_a.push(aligned.key.clone());
            }
            Provenance::OnlyB => {
                stats.only_b += 1;
                unique_b.push(aligned.key.clone());
            }
        }

        let row = DiffRow {
            row_number_a: aligned.row_number_a(),
            row_number_b: aligned.row_number_b(),
            key: aligned.key,
            cells,
            provenance,
        };
        if row.has_difference() {
            rows.push(row);
        }
    }
    stats.rows_with_differences = rows.len();

    debug!(
        matched = stats.matched,
        only_a = stats.only_a,
        only_b = stats.only_b,
        differing = stats.rows_with_differences,
        "rows aligned"
    );

    let compared_columns: Vec<String> = columns.into_iter().map(|c| c.name).collect();
    let summary = SummaryReport {
        counts: compared_columns.iter().cloned().zip(counts).collect(),
        unique_a,
        unique_b,
        label_a: label_a.clone(),
        label_b: label_b.clone(),
    };
    let diff = DiffReport {
        identifier_columns: config.identifier_columns.clone(),
        compared_columns,
        rows,
        label_a,
        label_b,
    };

    Ok(DiffOutcome { diff, summary, stats })
}

/// Result of a full comparison run, after both reports were written
#[derive(Debug, Clone)]
pub struct CompareResult {
    pub diff: DiffReport,
    pub summary: SummaryReport,
    pub stats: CompareStats,
    pub output_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Load both sources, compare them, and write the difference and summary reports
pub fn compare(config: &CompareConfig) -> Result<CompareResult> {
    config.validate()?;

    let factory = ParserFactory::new();
    let table_a = factory.parse(&config.source_a, config)?;
    let table_b = factory.parse(&config.source_b, config)?;
    info!(
        source_a = %config.source_a.display(),
        rows_a = table_a.row_count(),
        source_b = %config.source_b.display(),
        rows_b = table_b.row_count(),
        format = %config.format,
        "tables loaded"
    );

    let outcome = compute_diff(&table_a, &table_b, config)?;
    let summary_path = write_reports(&outcome.diff, &outcome.summary, &config.output_path)?;
    info!(
        output = %config.output_path.display(),
        summary = %summary_path.display(),
        rows = outcome.stats.rows_with_differences,
        "reports written"
    );

    Ok(CompareResult {
        diff: outcome.diff,
        summary: outcome.summary,
        stats: outcome.stats,
        output_path: config.output_path.clone(),
        summary_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(ids: &[&str]) -> CompareConfig {
        CompareConfig::new("A", "B", "out.csv").with_identifier_columns(ids.iter().copied())
    }

    #[test]
    fn test_single_changed_value() {
        let a = Table::from_rows(["id", "val"], [["1", "x"]]);
        let b = Table::from_rows(["id", "val"], [["1", "y"]]);
        let outcome = compute_diff(&a, &b, &config(&["id"])).unwrap();

        assert_eq!(outcome.diff.rows.len(), 1);
        let row = &outcome.diff.rows[0];
        assert_eq!(outcome.diff.cell(row, "val").unwrap().to_string(), "x | y");
        assert_eq!(row.row_number_a, 2);
        assert_eq!(row.row_number_b, 2);
        assert_eq!(row.provenance, Provenance::Matched);

        assert_eq!(outcome.summary.count("val"), Some(1));
        assert!(outcome.summary.unique_a.is_empty());
        assert!(outcome.summary.unique_b.is_empty());
    }

    #[test]
    fn test_identical_tables_produce_empty_report() {
        let a = Table::from_rows(["id", "val", "n"], [["1", "x", "3"], ["2", "", "4"]]);
        let outcome = compute_diff(&a, &a.clone(), &config(&["id"])).unwrap();

        assert!(outcome.diff.is_empty());
        assert!(!outcome.stats.has_differences());
        assert!(outcome.summary.counts.iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn test_duplicate_keys_three_against_two() {
        let a = Table::from_rows(["id", "v"], [["k", "1"], ["k", "2"], ["k", "3"]]);
        let b = Table::from_rows(["id", "v"], [["k", "1"], ["k", "9"]]);
        let outcome = compute_diff(&a, &b, &config(&["id"])).unwrap();

        assert_eq!(outcome.stats.matched, 2);
        assert_eq!(outcome.stats.only_a, 1);
        // second occurrence differs, third has no counterpart
        assert_eq!(outcome.diff.rows.len(), 2);
        assert_eq!(outcome.diff.rows[0].key.seq(), 1);
        assert_eq!(outcome.diff.rows[1].provenance, Provenance::OnlyA);
        assert_eq!(outcome.diff.rows[1].key.seq(), 2);
        assert_eq!(outcome.summary.count("v"), Some(2));
        assert_eq!(outcome.summary.unique_a.len(), 1);
    }

    #[test]
    fn test_one_sided_row_with_only_nulls_is_kept() {
        let a = Table::from_rows(["id", "v"], [["1", ""]]);
        let b = Table::from_rows(["id", "v"], Vec::<[&str; 2]>::new());
        let outcome = compute_diff(&a, &b, &config(&["id"])).unwrap();

        assert_eq!(outcome.diff.rows.len(), 1);
        let row = &outcome.diff.rows[0];
        assert_eq!(outcome.diff.cell(row, "v").unwrap().to_string(), "-- | --");
        assert_eq!(row.row_number_b, 0);
    }

    #[test]
    fn test_counts_are_symmetric() {
        let a = Table::from_rows(
            ["id", "v", "w"],
            [["1", "a", "p"], ["2", "b", "q"], ["2", "c", "r"], ["4", "d", "s"]],
        );
        let b = Table::from_rows(
            ["id", "w", "v"],
            [["2", "q", "b"], ["1", "p", "z"], ["5", "t", "e"]],
        );
        let ab = compute_diff(&a, &b, &config(&["id"])).unwrap();
        let ba = compute_diff(&b, &a, &config(&["id"])).unwrap();

        for col in ["v", "w"] {
            assert_eq!(ab.summary.count(col), ba.summary.count(col));
        }
        assert_eq!(ab.summary.unique_a, ba.summary.unique_b);
        assert_eq!(ab.summary.unique_b, ba.summary.unique_a);
    }

    #[test]
    fn test_identifier_and_unshared_columns_excluded() {
        let a = Table::from_rows(["id", "only_a", "v"], [["1", "x", "same"]]);
        let b = Table::from_rows(["v", "id", "only_b"], [["same", "1", "y"]]);
        let outcome = compute_diff(&a, &b, &config(&["id"])).unwrap();

        assert_eq!(outcome.diff.compared_columns, vec!["v".to_string()]);
        assert!(outcome.diff.is_empty());
    }

    #[test]
    fn test_missing_identifier_is_schema_error() {
        let a = Table::from_rows(["id", "v"], [["1", "x"]]);
        let err = compute_diff(&a, &a.clone(), &config(&["missing_col"])).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_no_shared_columns_is_schema_error() {
        let a = Table::from_rows(["id", "v"], [["1", "x"]]);
        let b = Table::from_rows(["id", "w"], [["1", "x"]]);
        let err = compute_diff(&a, &b, &config(&["id"])).unwrap_err();
        assert!(matches!(err, CompareError::NoSharedColumns { .. }));
    }
}
