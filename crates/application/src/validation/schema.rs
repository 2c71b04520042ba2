//! Schema Validator - shape and ID checks for one prediction table
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. Columns are exactly `{graph_id, target}`
//! 2. `graph_id` cells are integers with no repeats
//! 3. No `target` cell is missing
//! 4. Every `target` cell is an integral class id
//! 5. Row count equals the expected-ID row count
//! 6. Submitted ids equal the expected-ID universe

use graph_challenge_domain::{
    is_missing, ClassAssignments, ClassLabel, ExpectedIds, GraphId, Table, ValidationError,
    GRAPH_ID_COLUMN, REQUIRED_COLUMNS, TARGET_COLUMN,
};
use std::collections::HashSet;
use tracing::debug;

/// Ids listed per side in an `IdSetMismatch` error
const MISMATCH_SAMPLE_SIZE: usize = 5;

/// Validates prediction tables against a dataset's expected-ID universe
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a prediction table.
    ///
    /// Pure: reads the two inputs and nothing else. On success returns the
    /// typed `graph_id -> target` assignments in file order.
    pub fn validate(
        predictions: &Table,
        expected: &ExpectedIds,
    ) -> Result<ClassAssignments, ValidationError> {
        let (id_index, target_index) = Self::check_columns(predictions)?;
        let ids = Self::check_ids(predictions, id_index)?;
        let targets = Self::check_targets(predictions, target_index)?;

        if predictions.len() != expected.len() {
            return Err(ValidationError::RowCountMismatch {
                expected: expected.len(),
                actual: predictions.len(),
            });
        }

        Self::check_id_set(&ids, expected)?;

        debug!(rows = ids.len(), "Prediction table passed validation");
        Ok(ids.into_iter().zip(targets).collect())
    }

    fn check_columns(table: &Table) -> Result<(usize, usize), ValidationError> {
        let schema_mismatch = || ValidationError::SchemaMismatch {
            found: table.columns().to_vec(),
        };

        if !table.has_exact_columns(&REQUIRED_COLUMNS) {
            return Err(schema_mismatch());
        }

        let id_index = table.column_index(GRAPH_ID_COLUMN).ok_or_else(schema_mismatch)?;
        let target_index = table.column_index(TARGET_COLUMN).ok_or_else(schema_mismatch)?;
        Ok((id_index, target_index))
    }

    fn check_ids(table: &Table, index: usize) -> Result<Vec<GraphId>, ValidationError> {
        let mut seen = HashSet::with_capacity(table.len());
        let mut ids = Vec::with_capacity(table.len());

        for (row, raw) in table.column_cells(index) {
            let id = GraphId::parse_cell(raw).ok_or_else(|| ValidationError::InvalidCell {
                column: GRAPH_ID_COLUMN.to_string(),
                row,
                value: raw.to_string(),
            })?;

            if !seen.insert(id) {
                return Err(ValidationError::DuplicateId { graph_id: id, row });
            }
            ids.push(id);
        }

        Ok(ids)
    }

    fn check_targets(table: &Table, index: usize) -> Result<Vec<ClassLabel>, ValidationError> {
        // Missing values are reported before type errors anywhere in the column
        if let Some((row, _)) = table.column_cells(index).find(|(_, raw)| is_missing(raw)) {
            return Err(ValidationError::MissingValue { row });
        }

        table
            .column_cells(index)
            .map(|(row, raw)| {
                ClassLabel::parse_cell(raw).ok_or_else(|| ValidationError::NonNumericTarget {
                    row,
                    value: raw.to_string(),
                })
            })
            .collect()
    }

    fn check_id_set(ids: &[GraphId], expected: &ExpectedIds) -> Result<(), ValidationError> {
        let submitted: HashSet<GraphId> = ids.iter().copied().collect();

        let mut missing: Vec<GraphId> = expected.distinct().difference(&submitted).copied().collect();
        let mut unexpected: Vec<GraphId> = submitted.difference(expected.distinct()).copied().collect();

        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }

        missing.sort_unstable();
        unexpected.sort_unstable();

        Err(ValidationError::IdSetMismatch {
            missing: missing.len(),
            unexpected: unexpected.len(),
            missing_sample: missing.into_iter().take(MISMATCH_SAMPLE_SIZE).collect(),
            unexpected_sample: unexpected.into_iter().take(MISMATCH_SAMPLE_SIZE).collect(),
        })
    }
}
