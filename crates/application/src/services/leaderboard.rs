//! Leaderboard Service
//!
//! Rebuilds the published leaderboard from scratch out of every valid run
//! in the store. A rebuild is a pure function of the store's contents:
//! running it twice over an unchanged store writes identical rows.

use super::truth::GroundTruth;
use super::PipelineConfig;
use crate::leaderboard::build_ranking;
use crate::policy::enumerate_valid_runs;
use crate::ports::{GroundTruthStore, LeaderboardStore, RunStore};
use crate::ApplicationResult;
use graph_challenge_common::BatchMode;
use graph_challenge_domain::{ChallengeError, DatasetScores, LeaderboardRow, RunHandle, ValidRun};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A run that made it onto the leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRun {
    pub handle: RunHandle,
    pub team: String,
    pub scores: DatasetScores,
    /// Full-precision combined score
    pub combined: f64,
}

/// A run left off the leaderboard in isolate mode
#[derive(Debug)]
pub struct RunFailure {
    pub handle: RunHandle,
    pub team: String,
    pub error: ChallengeError,
}

/// Outcome of a leaderboard rebuild
#[derive(Debug, Default)]
pub struct RebuildReport {
    /// Rows as written, best first
    pub rows: Vec<LeaderboardRow>,
    /// Runs that were scored, in store order
    pub scored_runs: Vec<ScoredRun>,
    /// Runs skipped because validation or scoring failed
    pub failures: Vec<RunFailure>,
}

impl RebuildReport {
    /// True when every valid run made it onto the leaderboard
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Enforces the submission policy and maintains the leaderboard
pub struct LeaderboardService {
    runs: Arc<dyn RunStore>,
    truth: Arc<dyn GroundTruthStore>,
    leaderboard: Arc<dyn LeaderboardStore>,
    config: PipelineConfig,
}

impl LeaderboardService {
    pub fn new(
        runs: Arc<dyn RunStore>,
        truth: Arc<dyn GroundTruthStore>,
        leaderboard: Arc<dyn LeaderboardStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            runs,
            truth,
            leaderboard,
            config,
        }
    }

    /// Check the submission policy without scoring anything
    #[instrument(skip(self))]
    pub async fn check_policy(&self) -> ApplicationResult<Vec<ValidRun>> {
        enumerate_valid_runs(self.runs.as_ref()).await
    }

    /// Score every valid run, rank them, and publish the leaderboard.
    ///
    /// Policy and metadata violations abort in every batch mode. In strict
    /// mode any other run failure also aborts and nothing is written; in
    /// isolate mode the failing run is left out and reported.
    #[instrument(skip(self), fields(batch_mode = %self.config.batch_mode))]
    pub async fn rebuild(&self) -> ApplicationResult<RebuildReport> {
        let valid_runs = enumerate_valid_runs(self.runs.as_ref()).await?;
        let mut report = RebuildReport::default();

        // Labels are only needed, and only required to exist, once there is something to score
        if !valid_runs.is_empty() {
            let truth = GroundTruth::load(self.truth.as_ref()).await?;

            for run in valid_runs {
                match self.score_valid_run(&truth, &run).await {
                    Ok(scored) => report.scored_runs.push(scored),
                    Err(error) if error.is_policy_violation() => return Err(error),
                    Err(error) => match self.config.batch_mode {
                        BatchMode::Strict => return Err(error),
                        BatchMode::Isolate => {
                            warn!(
                                run = %run.handle,
                                team = %run.team(),
                                code = error.error_code(),
                                error = %error,
                                "Run excluded from leaderboard"
                            );
                            report.failures.push(RunFailure {
                                handle: run.handle.clone(),
                                team: run.team().to_string(),
                                error,
                            });
                        }
                    },
                }
            }
        }

        let combined: Vec<f64> = report.scored_runs.iter().map(|run| run.combined).collect();
        report.rows = build_ranking(&combined);

        self.leaderboard
            .write_rows(&report.rows, self.config.precision)
            .await?;

        info!(
            rows = report.rows.len(),
            failures = report.failures.len(),
            "Leaderboard rebuilt"
        );
        Ok(report)
    }

    /// The currently published leaderboard
    pub async fn current(&self) -> ApplicationResult<Vec<LeaderboardRow>> {
        self.leaderboard.read_rows().await
    }

    async fn score_valid_run(&self, truth: &GroundTruth, run: &ValidRun) -> ApplicationResult<ScoredRun> {
        let loaded = self.runs.load_run(&run.handle).await?;
        let scores = truth.score_run(&loaded)?;
        let combined = scores.combined()?;

        Ok(ScoredRun {
            handle: run.handle.clone(),
            team: run.team().to_string(),
            scores,
            combined,
        })
    }
}
