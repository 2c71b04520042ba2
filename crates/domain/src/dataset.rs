//! Dataset identity for the graph classification challenge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed benchmark datasets a run must cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Proteins,
    Mutag,
}

impl Dataset {
    /// Every dataset, in the order used for combined scores and reports
    pub const ALL: [Dataset; 2] = [Dataset::Proteins, Dataset::Mutag];

    pub fn all() -> &'static [Dataset] {
        &Self::ALL
    }

    /// Lowercase identifier used in file names and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proteins => "proteins",
            Self::Mutag => "mutag",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Proteins => "PROTEINS",
            Self::Mutag => "MUTAG",
        }
    }

    /// Prediction file a participant places in a run folder
    pub fn prediction_file_name(&self) -> String {
        format!("predictions_{}.csv", self.as_str())
    }

    /// Private label file kept in the organizer's labels directory
    pub fn labels_file_name(&self) -> String {
        format!("{}_test_labels.csv", self.as_str())
    }

    /// Key of this dataset's score in the single-run score record
    pub fn score_key(&self) -> String {
        format!("{}_score", self.as_str())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dataset name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset '{0}', expected one of: proteins, mutag")]
pub struct UnknownDataset(pub String);

impl FromStr for Dataset {
    type Err = UnknownDataset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proteins" => Ok(Self::Proteins),
            "mutag" => Ok(Self::Mutag),
            other => Err(UnknownDataset(other.to_string())),
        }
    }
}
