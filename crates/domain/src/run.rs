//! Participant runs: one submission attempt by one team.

use crate::dataset::Dataset;
use crate::metadata::Metadata;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of the metadata artifact inside a run folder
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Artifacts a run must contain to be structurally complete
pub fn required_artifacts() -> Vec<String> {
    Dataset::all()
        .iter()
        .map(Dataset::prediction_file_name)
        .chain(std::iter::once(METADATA_FILE_NAME.to_string()))
        .collect()
}

/// Location of one run inside a run store, plus which artifacts it lacks
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunHandle {
    /// Team folder the run lives under
    pub team_folder: String,
    /// Run folder name, unique within the team folder
    pub run_name: String,
    /// Required artifacts not present in the run folder
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_artifacts: Vec<String>,
}

impl RunHandle {
    pub fn new(team_folder: impl Into<String>, run_name: impl Into<String>) -> Self {
        Self {
            team_folder: team_folder.into(),
            run_name: run_name.into(),
            missing_artifacts: Vec::new(),
        }
    }

    pub fn with_missing(mut self, missing: Vec<String>) -> Self {
        self.missing_artifacts = missing;
        self
    }

    /// A run is complete once every prediction file and the metadata exist.
    /// Incomplete runs are work in progress, not violations.
    pub fn is_complete(&self) -> bool {
        self.missing_artifacts.is_empty()
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.team_folder, self.run_name)
    }
}

/// A complete run whose metadata passed validation and the team-folder check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidRun {
    pub handle: RunHandle,
    pub metadata: Metadata,
}

impl ValidRun {
    pub fn team(&self) -> &str {
        &self.metadata.team
    }
}

/// A run with its prediction tables loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub handle: RunHandle,
    pub metadata: Metadata,
    pub predictions: BTreeMap<Dataset, Table>,
}

impl Run {
    pub fn predictions_for(&self, dataset: Dataset) -> Option<&Table> {
        self.predictions.get(&dataset)
    }
}
