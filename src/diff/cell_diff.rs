//! Cell-level comparison logic

use crate::model::CellValue;

/// Rendering of an absent or null value, and of a cell with no difference
pub const PLACEHOLDER: &str = "--";

/// Compare two sides of a joined cell.
///
/// `None` means the whole row is absent on that side; it differs from
/// everything, null included. Present values compare by exact text, and
/// null equals only null.
pub fn cells_differ(a: Option<&CellValue>, b: Option<&CellValue>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a != b,
        _ => true,
    }
}

/// One cell of the difference report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffCell {
    NoDifference,
    /// Values from A and B; `None` when absent or null
    Changed { a: Option<String>, b: Option<String> },
}

impl DiffCell {
    /// Compare two sides and build the report cell
    pub fn compare(a: Option<&CellValue>, b: Option<&CellValue>) -> Self {
        if !cells_differ(a, b) {
            return DiffCell::NoDifference;
        }
        let text = |v: Option<&CellValue>| v.and_then(|c| c.as_text()).map(str::to_string);
        DiffCell::Changed { a: text(a), b: text(b) }
    }

    pub fn is_difference(&self) -> bool {
        matches!(self, DiffCell::Changed { .. })
    }
}

impl std::fmt::Display for DiffCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffCell::NoDifference => write!(f, "{}", PLACEHOLDER),
            DiffCell::Changed { a, b } => write!(
                f,
                "{} | {}",
                a.as_deref().unwrap_or(PLACEHOLDER),
                b.as_deref().unwrap_or(PLACEHOLDER)
            ),
        }
    }
}
