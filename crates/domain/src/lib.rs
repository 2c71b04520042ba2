//! Graph Challenge Domain Types
//!
//! This crate provides the core domain model for the graph classification
//! challenge: datasets, prediction and label tables, run metadata, scores,
//! leaderboard rows, and the error taxonomy shared by every other crate.
//! It performs no I/O.
//!
//! ## Architecture
//!
//! - **identifiers**: Integer-backed `GraphId` and `ClassLabel` newtypes
//! - **dataset**: The fixed set of challenge datasets and their file names
//! - **table**: Raw text tables, validated class assignments, expected-ID universes
//! - **metadata**: Participant-declared run metadata with load-time validation
//! - **run**: Run handles, validated runs, and loaded runs
//! - **score**: Per-dataset scores, score reports, leaderboard rows
//! - **errors**: Error types with stable taxonomy codes
//!
//! ## Usage
//!
//! ```rust
//! use graph_challenge_domain::{Dataset, DatasetScores, SCORE_PRECISION};
//!
//! let scores = DatasetScores::new()
//!     .with(Dataset::Proteins, 0.75)
//!     .with(Dataset::Mutag, 0.85);
//!
//! let report = scores.report(SCORE_PRECISION).unwrap();
//! assert_eq!(report.rounded_combined(), 0.8);
//! ```

#![warn(clippy::all)]

pub mod dataset;
pub mod errors;
pub mod identifiers;
pub mod metadata;
pub mod run;
pub mod score;
pub mod table;

pub use dataset::{Dataset, UnknownDataset};
pub use errors::{
    ChallengeError, ChallengeResult, MetadataError, PolicyError, ScoringError, StoreError,
    ValidationError,
};
pub use identifiers::{ClassLabel, GraphId};
pub use metadata::{Metadata, ModelType};
pub use run::{required_artifacts, Run, RunHandle, ValidRun, METADATA_FILE_NAME};
pub use score::{format_score, round_score, DatasetScores, LeaderboardRow, ScoreReport, SCORE_PRECISION};
pub use table::{
    is_missing, ClassAssignments, ExpectedIds, Table, GRAPH_ID_COLUMN, REQUIRED_COLUMNS,
    TARGET_COLUMN,
};
