//! CLI commands

pub mod leaderboard;
pub mod policy;
pub mod score;
pub mod validate;

use crate::output::OutputFormat;
use graph_challenge_application::{PipelineConfig, SubmissionService};
use graph_challenge_common::ChallengeConfig;
use graph_challenge_domain::{ChallengeError, ChallengeResult};
use graph_challenge_infrastructure::FsGroundTruth;
use std::path::Path;
use std::sync::Arc;

/// Context passed to all commands
pub struct CommandContext {
    pub config: ChallengeConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context from fully resolved configuration
    pub fn new(config: ChallengeConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::from(&self.config.scoring)
    }

    /// Ground truth over the configured data and labels directories
    pub fn ground_truth(&self) -> FsGroundTruth {
        let truth = FsGroundTruth::new(&self.config.paths.data_dir);
        match &self.config.paths.labels_dir {
            Some(dir) => truth.with_labels_dir(dir),
            None => truth,
        }
    }

    pub fn submission_service(&self) -> SubmissionService {
        SubmissionService::new(Arc::new(self.ground_truth()), self.pipeline_config())
    }

    /// The labels directory, which scoring commands cannot run without
    pub fn require_labels_dir(&self) -> ChallengeResult<&Path> {
        self.config.paths.labels_dir.as_deref().ok_or_else(|| {
            ChallengeError::Configuration(
                "No labels directory given. Pass --labels-dir or set CHALLENGE_PATHS__LABELS_DIR"
                    .to_string(),
            )
        })
    }
}
