//! Infrastructure layer for the graph challenge pipeline
//!
//! This crate provides filesystem implementations of the application ports:
//! - `FsRunStore` - the `<inbox>/<team>/<run>/` submission tree
//! - `FsGroundTruth` - public expected-ID files and private labels
//! - `FsLeaderboardStore` - the published `rank,score` CSV, written atomically
//!
//! plus the CSV and metadata readers they share.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use graph_challenge_application::{LeaderboardService, PipelineConfig};
//! use graph_challenge_infrastructure::{FsGroundTruth, FsLeaderboardStore, FsRunStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = LeaderboardService::new(
//!     Arc::new(FsRunStore::new("submissions/inbox")),
//!     Arc::new(FsGroundTruth::new("data").with_labels_dir("/secrets/labels")),
//!     Arc::new(FsLeaderboardStore::new("leaderboard/leaderboard.csv")),
//!     PipelineConfig::default(),
//! );
//! let report = service.rebuild().await?;
//! println!("{} rows", report.rows.len());
//! # Ok(())
//! # }
//! ```

pub mod ground_truth;
pub mod leaderboard;
pub mod metadata;
pub mod run_store;
pub mod tables;

pub use ground_truth::FsGroundTruth;
pub use leaderboard::FsLeaderboardStore;
pub use metadata::read_metadata;
pub use run_store::FsRunStore;
pub use tables::{parse_table, read_expected_ids, read_table};
