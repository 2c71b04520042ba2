//! Submission Service
//!
//! Scores one ad-hoc submission, such as the run attached to a single pull
//! request. Bypasses the policy check and the leaderboard entirely.

use super::truth::GroundTruth;
use super::PipelineConfig;
use crate::ports::GroundTruthStore;
use crate::scoring::Scorer;
use crate::validation::SchemaValidator;
use crate::ApplicationResult;
use graph_challenge_domain::{ChallengeError, ClassAssignments, Dataset, Run, ScoreReport, Table};
use std::sync::Arc;
use tracing::{info, instrument};

/// Validates and scores individual submissions
pub struct SubmissionService {
    truth: Arc<dyn GroundTruthStore>,
    config: PipelineConfig,
}

impl SubmissionService {
    pub fn new(truth: Arc<dyn GroundTruthStore>, config: PipelineConfig) -> Self {
        Self { truth, config }
    }

    /// Run the Schema Validator on one prediction table
    #[instrument(skip(self, predictions), fields(rows = predictions.len()))]
    pub async fn validate_predictions(
        &self,
        dataset: Dataset,
        predictions: &Table,
    ) -> ApplicationResult<ClassAssignments> {
        let expected = self.truth.expected_ids(dataset).await?;
        let assignments = SchemaValidator::validate(predictions, &expected)?;
        info!(dataset = %dataset, rows = assignments.len(), "Submission is valid");
        Ok(assignments)
    }

    /// Validate one prediction table, then score it against `labels`
    #[instrument(skip(self, predictions, labels))]
    pub async fn score_predictions(
        &self,
        dataset: Dataset,
        predictions: &Table,
        labels: &Table,
    ) -> ApplicationResult<f64> {
        let assignments = self.validate_predictions(dataset, predictions).await?;
        let score = Scorer::score(&assignments, labels).map_err(ChallengeError::from)?;
        info!(dataset = %dataset, score, "Submission scored");
        Ok(score)
    }

    /// Validate and score every dataset of a run and build its score record
    #[instrument(skip(self, run), fields(run = %run.handle, team = %run.metadata.team))]
    pub async fn score_run(&self, run: &Run) -> ApplicationResult<ScoreReport> {
        let truth = GroundTruth::load(self.truth.as_ref()).await?;
        let scores = truth.score_run(run)?;
        let report = scores.report(self.config.precision)?;

        info!(
            combined = report.combined,
            model = %run.metadata.model,
            model_type = %run.metadata.model_type,
            "Run scored"
        );
        Ok(report)
    }
}
