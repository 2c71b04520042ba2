//! Filesystem ground truth
//!
//! Expected ids come from the public split files at
//! `<data_dir>/<dataset>/test.csv`. Private labels come from
//! `<labels_dir>/<dataset>_test_labels.csv`, a directory supplied
//! out-of-band that participants never see.

use crate::tables::{read_expected_ids, read_table};
use async_trait::async_trait;
use graph_challenge_application::{ApplicationResult, GroundTruthStore};
use graph_challenge_domain::{ChallengeError, Dataset, ExpectedIds, Table};
use std::path::{Path, PathBuf};

/// Ground truth read from the public data and private labels directories
#[derive(Debug, Clone)]
pub struct FsGroundTruth {
    data_dir: PathBuf,
    labels_dir: Option<PathBuf>,
}

impl FsGroundTruth {
    /// Ground truth with expected ids only. Label lookups fail until a
    /// labels directory is set.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            labels_dir: None,
        }
    }

    pub fn with_labels_dir(mut self, labels_dir: impl Into<PathBuf>) -> Self {
        self.labels_dir = Some(labels_dir.into());
        self
    }

    pub fn expected_ids_path(&self, dataset: Dataset) -> PathBuf {
        self.data_dir.join(dataset.as_str()).join("test.csv")
    }

    pub fn labels_path(&self, dataset: Dataset) -> Option<PathBuf> {
        self.labels_dir
            .as_deref()
            .map(|dir: &Path| dir.join(dataset.labels_file_name()))
    }
}

#[async_trait]
impl GroundTruthStore for FsGroundTruth {
    async fn expected_ids(&self, dataset: Dataset) -> ApplicationResult<ExpectedIds> {
        read_expected_ids(&self.expected_ids_path(dataset)).await
    }

    async fn labels(&self, dataset: Dataset) -> ApplicationResult<Table> {
        let path = self.labels_path(dataset).ok_or_else(|| {
            ChallengeError::Configuration("No private labels directory configured".to_string())
        })?;
        read_table(&path).await
    }
}
