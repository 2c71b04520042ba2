//! Scores, score reports, and leaderboard rows.

use crate::dataset::Dataset;
use crate::errors::ScoringError;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decimal digits used for every published score
pub const SCORE_PRECISION: u32 = 8;

/// Format a score with a fixed number of decimal digits
pub fn format_score(value: f64, digits: u32) -> String {
    format!("{:.*}", digits as usize, value)
}

/// Round a score to `digits` decimals.
///
/// Rounds through the formatted text, so the rounded value always prints
/// exactly as [`format_score`] would.
pub fn round_score(value: f64, digits: u32) -> f64 {
    format_score(value, digits).parse().unwrap_or(value)
}

/// Macro-F1 score per dataset for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetScores {
    scores: BTreeMap<Dataset, f64>,
}

impl DatasetScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dataset: Dataset, score: f64) {
        self.scores.insert(dataset, score);
    }

    pub fn with(mut self, dataset: Dataset, score: f64) -> Self {
        self.insert(dataset, score);
        self
    }

    pub fn get(&self, dataset: Dataset) -> Option<f64> {
        self.scores.get(&dataset).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dataset, f64)> + '_ {
        self.scores.iter().map(|(d, s)| (*d, *s))
    }

    /// Unweighted mean over every dataset, at full precision.
    ///
    /// Each dataset counts equally regardless of its size.
    pub fn combined(&self) -> Result<f64, ScoringError> {
        let mut total = 0.0;
        for dataset in Dataset::all() {
            total += self
                .get(*dataset)
                .ok_or(ScoringError::MissingDatasetScore(*dataset))?;
        }
        Ok(total / Dataset::ALL.len() as f64)
    }

    /// Build the published score record
    pub fn report(&self, precision: u32) -> Result<ScoreReport, ScoringError> {
        Ok(ScoreReport {
            combined: self.combined()?,
            per_dataset: self.scores.clone(),
            precision,
        })
    }
}

/// Machine-readable result of scoring one run.
///
/// Serializes as `{"score": …, "<dataset>_score": …}` with the combined
/// score first and datasets in [`Dataset::ALL`] order, every value rounded
/// to the report precision.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub combined: f64,
    pub per_dataset: BTreeMap<Dataset, f64>,
    pub precision: u32,
}

impl ScoreReport {
    pub fn rounded_combined(&self) -> f64 {
        round_score(self.combined, self.precision)
    }
}

impl Serialize for ScoreReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.per_dataset.len()))?;
        map.serialize_entry("score", &self.rounded_combined())?;
        for dataset in Dataset::all() {
            if let Some(score) = self.per_dataset.get(dataset) {
                map.serialize_entry(&dataset.score_key(), &round_score(*score, self.precision))?;
            }
        }
        map.end()
    }
}

/// One published leaderboard row. Team identity is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based competition rank
    pub rank: u32,
    /// Combined score at full precision
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_round() {
        assert_eq!(format_score(0.5, 8), "0.50000000");
        assert_eq!(format_score(2.0 / 3.0, 8), "0.66666667");
        assert_eq!(round_score(2.0 / 3.0, 8), 0.66666667);
        assert_eq!(round_score(1.0, 8), 1.0);
    }

    #[test]
    fn test_combined_is_unweighted_mean() {
        let scores = DatasetScores::new()
            .with(Dataset::Proteins, 0.8)
            .with(Dataset::Mutag, 0.6);
        assert!((scores.combined().unwrap() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_combined_requires_every_dataset() {
        let scores = DatasetScores::new().with(Dataset::Proteins, 0.8);
        assert_eq!(
            scores.combined(),
            Err(ScoringError::MissingDatasetScore(Dataset::Mutag))
        );
    }

    #[test]
    fn test_report_serialization_order() {
        let report = DatasetScores::new()
            .with(Dataset::Mutag, 1.0 / 3.0)
            .with(Dataset::Proteins, 1.0)
            .report(SCORE_PRECISION)
            .unwrap();

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"score":0.66666667,"proteins_score":1.0,"mutag_score":0.33333333}"#
        );
    }
}
