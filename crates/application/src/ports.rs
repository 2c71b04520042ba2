//! Storage ports
//!
//! The pipeline only ever reads runs and ground truth and writes one
//! leaderboard. Each concern is a trait so the filesystem adapters in the
//! infrastructure crate and the in-memory mocks used in tests are
//! interchangeable.

use crate::ApplicationResult;
use async_trait::async_trait;
use graph_challenge_domain::{
    Dataset, ExpectedIds, LeaderboardRow, Metadata, Run, RunHandle, Table,
};
use std::collections::BTreeMap;

/// Read-only store of participant runs
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Every run folder in the store, complete or not, sorted by team folder
    /// then run name. Incomplete runs carry their missing artifacts.
    async fn list_runs(&self) -> ApplicationResult<Vec<RunHandle>>;

    /// Load and validate a run's metadata
    async fn load_metadata(&self, handle: &RunHandle) -> ApplicationResult<Metadata>;

    /// Load one dataset's raw prediction table
    async fn load_predictions(&self, handle: &RunHandle, dataset: Dataset) -> ApplicationResult<Table>;

    /// Load a complete run: metadata plus one prediction table per dataset
    async fn load_run(&self, handle: &RunHandle) -> ApplicationResult<Run> {
        let metadata = self.load_metadata(handle).await?;

        let mut predictions = BTreeMap::new();
        for dataset in Dataset::all() {
            let table = self.load_predictions(handle, *dataset).await?;
            predictions.insert(*dataset, table);
        }

        Ok(Run {
            handle: handle.clone(),
            metadata,
            predictions,
        })
    }
}

/// Organizer-side ground truth: public expected ids and private labels
#[async_trait]
pub trait GroundTruthStore: Send + Sync {
    /// Expected-ID universe of a dataset's test split
    async fn expected_ids(&self, dataset: Dataset) -> ApplicationResult<ExpectedIds>;

    /// Raw private label table of a dataset
    async fn labels(&self, dataset: Dataset) -> ApplicationResult<Table>;
}

/// Destination of the published leaderboard
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Replace the leaderboard with `rows`, scores printed with `precision` digits
    async fn write_rows(&self, rows: &[LeaderboardRow], precision: u32) -> ApplicationResult<()>;

    /// Read the currently published leaderboard
    async fn read_rows(&self) -> ApplicationResult<Vec<LeaderboardRow>>;
}
