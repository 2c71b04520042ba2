//! In-memory implementations of the pipeline's storage ports.
//!
//! Provides mocks for testing the application services without touching
//! the filesystem.

use crate::fixtures::{create_test_expected_ids, create_test_label_table};
use async_trait::async_trait;
use graph_challenge_application::{
    ApplicationResult, GroundTruthStore, LeaderboardStore, RunStore,
};
use graph_challenge_domain::{
    ChallengeError, Dataset, ExpectedIds, LeaderboardRow, Metadata, Run, RunHandle, StoreError,
    Table, METADATA_FILE_NAME,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct StoredRun {
    metadata: Option<Value>,
    predictions: BTreeMap<Dataset, Table>,
}

impl StoredRun {
    fn missing_artifacts(&self) -> Vec<String> {
        let mut missing: Vec<String> = Dataset::all()
            .iter()
            .filter(|dataset| !self.predictions.contains_key(*dataset))
            .map(Dataset::prediction_file_name)
            .collect();
        if self.metadata.is_none() {
            missing.push(METADATA_FILE_NAME.to_string());
        }
        missing
    }
}

fn not_found(handle: &RunHandle, artifact: &str) -> ChallengeError {
    StoreError::FileNotFound {
        path: PathBuf::from(&handle.team_folder)
            .join(&handle.run_name)
            .join(artifact),
    }
    .into()
}

/// Mock run store keyed by `(team_folder, run_name)`
#[derive(Clone, Default)]
pub struct InMemoryRunStore {
    runs: Arc<RwLock<BTreeMap<(String, String), StoredRun>>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a complete run
    pub fn insert_run(&self, run: &Run) {
        let metadata = serde_json::json!({
            "team": run.metadata.team,
            "model": run.metadata.model,
            "model_type": run.metadata.model_type.as_str(),
            "runtime_minutes": run.metadata.runtime_minutes,
        });
        self.insert_raw(
            &run.handle.team_folder,
            &run.handle.run_name,
            Some(metadata),
            run.predictions.clone(),
        );
    }

    /// Store a run exactly as given. Absent metadata or prediction tables
    /// make the run incomplete; the metadata JSON is not validated here.
    pub fn insert_raw(
        &self,
        team_folder: &str,
        run_name: &str,
        metadata: Option<Value>,
        predictions: BTreeMap<Dataset, Table>,
    ) {
        self.runs.write().insert(
            (team_folder.to_string(), run_name.to_string()),
            StoredRun {
                metadata,
                predictions,
            },
        );
    }

    pub fn run_count(&self) -> usize {
        self.runs.read().len()
    }

    fn get(&self, handle: &RunHandle) -> Option<StoredRun> {
        self.runs
            .read()
            .get(&(handle.team_folder.clone(), handle.run_name.clone()))
            .cloned()
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn list_runs(&self) -> ApplicationResult<Vec<RunHandle>> {
        Ok(self
            .runs
            .read()
            .iter()
            .map(|((team, run), stored)| {
                RunHandle::new(team.clone(), run.clone()).with_missing(stored.missing_artifacts())
            })
            .collect())
    }

    async fn load_metadata(&self, handle: &RunHandle) -> ApplicationResult<Metadata> {
        let value = self
            .get(handle)
            .and_then(|stored| stored.metadata)
            .ok_or_else(|| not_found(handle, METADATA_FILE_NAME))?;
        Ok(Metadata::from_json(&value)?)
    }

    async fn load_predictions(&self, handle: &RunHandle, dataset: Dataset) -> ApplicationResult<Table> {
        self.get(handle)
            .and_then(|mut stored| stored.predictions.remove(&dataset))
            .ok_or_else(|| not_found(handle, &dataset.prediction_file_name()))
    }
}

/// Mock ground truth that records which label tables were requested
#[derive(Clone, Default)]
pub struct InMemoryGroundTruth {
    expected: Arc<RwLock<BTreeMap<Dataset, ExpectedIds>>>,
    labels: Arc<RwLock<BTreeMap<Dataset, Table>>>,
    label_reads: Arc<RwLock<Vec<Dataset>>>,
}

impl InMemoryGroundTruth {
    /// An empty store: every lookup fails with `FileNotFound`
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the shared fixture truth for every dataset
    pub fn with_fixtures() -> Self {
        let store = Self::new();
        for dataset in Dataset::all() {
            store.set_expected_ids(*dataset, create_test_expected_ids(*dataset));
            store.set_labels(*dataset, create_test_label_table(*dataset));
        }
        store
    }

    pub fn set_expected_ids(&self, dataset: Dataset, ids: ExpectedIds) {
        self.expected.write().insert(dataset, ids);
    }

    pub fn set_labels(&self, dataset: Dataset, labels: Table) {
        self.labels.write().insert(dataset, labels);
    }

    /// Datasets whose labels have been requested, in request order
    pub fn label_reads(&self) -> Vec<Dataset> {
        self.label_reads.read().clone()
    }
}

#[async_trait]
impl GroundTruthStore for InMemoryGroundTruth {
    async fn expected_ids(&self, dataset: Dataset) -> ApplicationResult<ExpectedIds> {
        self.expected.read().get(&dataset).cloned().ok_or_else(|| {
            StoreError::FileNotFound {
                path: PathBuf::from(dataset.as_str()).join("test.csv"),
            }
            .into()
        })
    }

    async fn labels(&self, dataset: Dataset) -> ApplicationResult<Table> {
        self.label_reads.write().push(dataset);
        self.labels.read().get(&dataset).cloned().ok_or_else(|| {
            StoreError::FileNotFound {
                path: PathBuf::from(dataset.labels_file_name()),
            }
            .into()
        })
    }
}

/// Mock leaderboard destination
#[derive(Clone, Default)]
pub struct InMemoryLeaderboardStore {
    rows: Arc<RwLock<Option<Vec<LeaderboardRow>>>>,
    writes: Arc<RwLock<usize>>,
}

impl InMemoryLeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows from the last write, if any
    pub fn written_rows(&self) -> Option<Vec<LeaderboardRow>> {
        self.rows.read().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.read()
    }
}

#[async_trait]
impl LeaderboardStore for InMemoryLeaderboardStore {
    async fn write_rows(&self, rows: &[LeaderboardRow], _precision: u32) -> ApplicationResult<()> {
        *self.rows.write() = Some(rows.to_vec());
        *self.writes.write() += 1;
        Ok(())
    }

    async fn read_rows(&self) -> ApplicationResult<Vec<LeaderboardRow>> {
        self.rows.read().clone().ok_or_else(|| {
            StoreError::FileNotFound {
                path: PathBuf::from("leaderboard.csv"),
            }
            .into()
        })
    }
}
