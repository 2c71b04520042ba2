//! Pipeline services
//!
//! - [`SubmissionService`] validates and scores one ad-hoc submission
//! - [`LeaderboardService`] enforces the policy over the whole run store and
//!   rebuilds the published leaderboard

mod leaderboard;
mod submission;
mod truth;

pub use leaderboard::{LeaderboardService, RebuildReport, RunFailure, ScoredRun};
pub use submission::SubmissionService;
pub use truth::GroundTruth;

use graph_challenge_common::{BatchMode, ScoringConfig};
use graph_challenge_domain::SCORE_PRECISION;

/// Settings shared by the pipeline services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Decimal digits for published scores
    pub precision: u32,
    /// Failure handling during a leaderboard rebuild
    pub batch_mode: BatchMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            precision: SCORE_PRECISION,
            batch_mode: BatchMode::Strict,
        }
    }
}

impl From<&ScoringConfig> for PipelineConfig {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            precision: config.precision,
            batch_mode: config.batch_mode,
        }
    }
}
