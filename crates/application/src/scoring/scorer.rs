//! Label parsing and the prediction/label join

use super::metrics::macro_f1;
use graph_challenge_domain::{
    ClassAssignments, ClassLabel, GraphId, ScoringError, Table, GRAPH_ID_COLUMN, REQUIRED_COLUMNS,
    TARGET_COLUMN,
};
use std::collections::HashMap;
use tracing::debug;

/// Scores validated predictions against private labels
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer;

impl Scorer {
    /// Parse a private label table into typed assignments.
    ///
    /// The label file must have exactly the `{graph_id, target}` columns and
    /// every cell must be an integer.
    pub fn parse_labels(labels: &Table) -> Result<ClassAssignments, ScoringError> {
        let schema_mismatch = || ScoringError::LabelSchemaMismatch {
            found: labels.columns().to_vec(),
        };

        if !labels.has_exact_columns(&REQUIRED_COLUMNS) {
            return Err(schema_mismatch());
        }
        let id_index = labels.column_index(GRAPH_ID_COLUMN).ok_or_else(schema_mismatch)?;
        let target_index = labels.column_index(TARGET_COLUMN).ok_or_else(schema_mismatch)?;

        labels
            .column_cells(id_index)
            .zip(labels.column_cells(target_index))
            .map(|((row, raw_id), (_, raw_target))| {
                let id = GraphId::parse_cell(raw_id)
                    .ok_or_else(|| invalid_cell(GRAPH_ID_COLUMN, row, raw_id))?;
                let target = ClassLabel::parse_cell(raw_target)
                    .ok_or_else(|| invalid_cell(TARGET_COLUMN, row, raw_target))?;
                Ok((id, target))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ClassAssignments::new)
    }

    /// Macro F1 of validated predictions against a raw label table
    pub fn score(predictions: &ClassAssignments, labels: &Table) -> Result<f64, ScoringError> {
        let labels = Self::parse_labels(labels)?;
        Self::score_assignments(predictions, &labels)
    }

    /// Macro F1 of validated predictions against parsed labels.
    ///
    /// Inner-joins on `graph_id`. Every label row must find a prediction;
    /// a join that drops label rows fails with `IncompleteMatch` even if the
    /// predictions already passed the ID-set check.
    pub fn score_assignments(
        predictions: &ClassAssignments,
        labels: &ClassAssignments,
    ) -> Result<f64, ScoringError> {
        let predicted: HashMap<GraphId, ClassLabel> = predictions.to_map();

        let joined: Vec<(ClassLabel, ClassLabel)> = labels
            .entries()
            .iter()
            .filter_map(|(id, truth)| predicted.get(id).map(|p| (*truth, *p)))
            .collect();

        if joined.len() != labels.len() {
            return Err(ScoringError::IncompleteMatch {
                matched: joined.len(),
                expected: labels.len(),
            });
        }

        let score = macro_f1(joined);
        debug!(rows = labels.len(), score, "Scored predictions against labels");
        Ok(score)
    }
}

fn invalid_cell(column: &str, row: usize, value: &str) -> ScoringError {
    ScoringError::InvalidLabelCell {
        column: column.to_string(),
        row,
        value: value.to_string(),
    }
}
