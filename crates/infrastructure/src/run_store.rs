//! Filesystem run store over the submission inbox
//!
//! Layout: `<inbox>/<team_folder>/<run_name>/` holding one
//! `predictions_<dataset>.csv` per dataset and a `metadata.json`.
//! Anything that is not a directory at the team or run level is ignored.

use crate::metadata::read_metadata;
use crate::tables::read_table;
use async_trait::async_trait;
use graph_challenge_application::{ApplicationResult, RunStore};
use graph_challenge_domain::{
    required_artifacts, ChallengeResult, Dataset, Metadata, Run, RunHandle, StoreError, Table,
    METADATA_FILE_NAME,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Read-only view of an inbox directory
#[derive(Debug, Clone)]
pub struct FsRunStore {
    inbox: PathBuf,
}

impl FsRunStore {
    pub fn new(inbox: impl Into<PathBuf>) -> Self {
        Self {
            inbox: inbox.into(),
        }
    }

    pub fn inbox(&self) -> &Path {
        &self.inbox
    }

    fn run_dir(&self, handle: &RunHandle) -> PathBuf {
        self.inbox.join(&handle.team_folder).join(&handle.run_name)
    }

    /// Load a single run directory with an explicitly located metadata file.
    ///
    /// Used for ad-hoc scoring where the run does not live in an inbox.
    /// Missing inputs fail with `FileNotFound` naming the path: the metadata
    /// file first, then the run directory, then each prediction file.
    #[instrument(skip_all, fields(run_dir = %run_dir.display(), metadata = %metadata_path.display()))]
    pub async fn load_run_dir(run_dir: &Path, metadata_path: &Path) -> ChallengeResult<Run> {
        if !is_file(metadata_path).await {
            return Err(StoreError::FileNotFound {
                path: metadata_path.to_path_buf(),
            }
            .into());
        }
        if !is_dir(run_dir).await {
            return Err(StoreError::FileNotFound {
                path: run_dir.to_path_buf(),
            }
            .into());
        }

        let metadata = read_metadata(metadata_path).await?;

        let mut predictions = BTreeMap::new();
        for dataset in Dataset::all() {
            let path = run_dir.join(dataset.prediction_file_name());
            predictions.insert(*dataset, read_table(&path).await?);
        }

        Ok(Run {
            handle: RunHandle::new(file_name(run_dir.parent()), file_name(Some(run_dir))),
            metadata,
            predictions,
        })
    }
}

#[async_trait]
impl RunStore for FsRunStore {
    #[instrument(skip(self), fields(inbox = %self.inbox.display()))]
    async fn list_runs(&self) -> ApplicationResult<Vec<RunHandle>> {
        if !is_dir(&self.inbox).await {
            debug!("Inbox does not exist, no submissions yet");
            return Ok(Vec::new());
        }

        let mut handles = Vec::new();
        for team_folder in sorted_subdirectories(&self.inbox).await? {
            let team_dir = self.inbox.join(&team_folder);
            for run_name in sorted_subdirectories(&team_dir).await? {
                let run_dir = team_dir.join(&run_name);

                let mut missing = Vec::new();
                for artifact in required_artifacts() {
                    if !is_file(&run_dir.join(&artifact)).await {
                        missing.push(artifact);
                    }
                }

                handles.push(RunHandle::new(team_folder.clone(), run_name).with_missing(missing));
            }
        }

        debug!(runs = handles.len(), "Listed inbox runs");
        Ok(handles)
    }

    async fn load_metadata(&self, handle: &RunHandle) -> ApplicationResult<Metadata> {
        read_metadata(&self.run_dir(handle).join(METADATA_FILE_NAME)).await
    }

    async fn load_predictions(&self, handle: &RunHandle, dataset: Dataset) -> ApplicationResult<Table> {
        read_table(&self.run_dir(handle).join(dataset.prediction_file_name())).await
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn file_name(path: Option<&Path>) -> String {
    path.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Names of the directories directly under `dir`, sorted
async fn sorted_subdirectories(dir: &Path) -> ChallengeResult<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| StoreError::from_io(dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StoreError::from_io(dir, e))?
    {
        if is_dir(&entry.path()).await {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}
