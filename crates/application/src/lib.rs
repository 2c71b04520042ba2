//! Application layer for the graph classification challenge
//!
//! This crate holds the pipeline logic and coordinates between the domain
//! types and the storage adapters.
//!
//! ## Architecture
//!
//! Storage is reached only through the port traits in [`ports`], so every
//! component here is independent of where runs, labels, and the
//! leaderboard actually live.
//!
//! ## Modules
//!
//! - `validation` - Schema Validator for prediction tables
//! - `scoring` - Label parsing, the prediction/label join, and macro F1
//! - `policy` - Policy Enforcer: one valid run per team
//! - `leaderboard` - Competition ranking with tie handling
//! - `services` - Single-run scoring and full leaderboard rebuild
//! - `ports` - Storage traits implemented by infrastructure and mocks

pub mod leaderboard;
pub mod policy;
pub mod ports;
pub mod scoring;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use leaderboard::build_ranking;
pub use policy::{enumerate_valid_runs, ensure_one_attempt_per_team};
pub use ports::{GroundTruthStore, LeaderboardStore, RunStore};
pub use scoring::{macro_f1, Scorer};
pub use services::{
    GroundTruth, LeaderboardService, PipelineConfig, RebuildReport, RunFailure, ScoredRun,
    SubmissionService,
};
pub use validation::SchemaValidator;

use graph_challenge_domain::ChallengeError;

/// Result type for application operations
pub type ApplicationResult<T> = Result<T, ChallengeError>;
