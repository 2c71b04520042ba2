//! In-memory tables read from submission, label, and expected-ID files.
//!
//! A [`Table`] keeps every cell as raw text so that the schema validator can
//! report exactly which check a file fails. Typed views such as
//! [`ClassAssignments`] only exist once a table has been validated.

use crate::identifiers::{ClassLabel, GraphId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Column holding graph identifiers
pub const GRAPH_ID_COLUMN: &str = "graph_id";

/// Column holding class ids
pub const TARGET_COLUMN: &str = "target";

/// Exact column set required for prediction and label tables
pub const REQUIRED_COLUMNS: [&str; 2] = [GRAPH_ID_COLUMN, TARGET_COLUMN];

/// Cell spellings that count as a missing value rather than text
const MISSING_TOKENS: &[&str] = &[
    "", "na", "n/a", "nan", "-nan", "null", "none", "<na>",
];

/// Returns true if a raw cell denotes a missing value
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Header plus rows of raw cells, as read from a delimited text file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table. Every row is expected to have one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if the column names are exactly `required`, ignoring order.
    ///
    /// A repeated column name never matches, even if the set of distinct
    /// names would.
    pub fn has_exact_columns(&self, required: &[&str]) -> bool {
        if self.columns.len() != required.len() {
            return false;
        }
        let found: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        found.len() == required.len() && required.iter().all(|c| found.contains(c))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over `(row_number, cell)` for one column. Row numbers are
    /// 1-based and count data rows only (the header is not row 1).
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(move |(i, row)| (i + 1, row.get(index).map(String::as_str).unwrap_or("")))
    }
}

/// Validated `graph_id -> target` pairs
///
/// Produced by the schema validator for prediction tables and by the scorer
/// for label tables. Row order is preserved from the source table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassAssignments {
    entries: Vec<(GraphId, ClassLabel)>,
}

impl ClassAssignments {
    pub fn new(entries: Vec<(GraphId, ClassLabel)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(GraphId, ClassLabel)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index by graph id. If an id repeats, the last assignment wins.
    pub fn to_map(&self) -> HashMap<GraphId, ClassLabel> {
        self.entries.iter().copied().collect()
    }
}

impl FromIterator<(GraphId, ClassLabel)> for ClassAssignments {
    fn from_iter<I: IntoIterator<Item = (GraphId, ClassLabel)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The expected-ID universe of one dataset's test split
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpectedIds {
    ids: Vec<GraphId>,
    distinct: HashSet<GraphId>,
}

impl ExpectedIds {
    pub fn new(ids: Vec<GraphId>) -> Self {
        let distinct = ids.iter().copied().collect();
        Self { ids, distinct }
    }

    /// Number of rows in the expected-ID file, repeats included
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &GraphId) -> bool {
        self.distinct.contains(id)
    }

    pub fn distinct(&self) -> &HashSet<GraphId> {
        &self.distinct
    }

    /// Ids in file order
    pub fn ids(&self) -> &[GraphId] {
        &self.ids
    }
}

impl FromIterator<GraphId> for ExpectedIds {
    fn from_iter<I: IntoIterator<Item = GraphId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
