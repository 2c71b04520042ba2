//! Ground truth loaded once per pipeline invocation

use crate::ports::GroundTruthStore;
use crate::scoring::Scorer;
use crate::validation::SchemaValidator;
use crate::ApplicationResult;
use graph_challenge_domain::{
    ChallengeError, ClassAssignments, Dataset, DatasetScores, ExpectedIds, Run, StoreError,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
struct DatasetTruth {
    expected: ExpectedIds,
    labels: ClassAssignments,
}

/// Expected ids and parsed private labels for every dataset
#[derive(Debug, Clone)]
pub struct GroundTruth {
    datasets: BTreeMap<Dataset, DatasetTruth>,
}

impl GroundTruth {
    /// Load and parse the truth for every dataset.
    ///
    /// A bad label file is an organizer problem, so it fails here rather
    /// than being attributed to whichever run happens to be scored first.
    #[instrument(skip(store))]
    pub async fn load(store: &dyn GroundTruthStore) -> ApplicationResult<Self> {
        let mut datasets = BTreeMap::new();

        for dataset in Dataset::all() {
            let expected = store.expected_ids(*dataset).await?;
            let table = store.labels(*dataset).await?;
            let labels = Scorer::parse_labels(&table).map_err(|e| {
                ChallengeError::from(e).context(format!("{} labels", dataset.display_name()))
            })?;

            debug!(
                dataset = %dataset,
                expected_ids = expected.len(),
                labels = labels.len(),
                "Loaded ground truth"
            );
            datasets.insert(*dataset, DatasetTruth { expected, labels });
        }

        Ok(Self { datasets })
    }

    /// Validate and score every prediction table of a run
    pub fn score_run(&self, run: &Run) -> ApplicationResult<DatasetScores> {
        let mut scores = DatasetScores::new();

        for (dataset, truth) in &self.datasets {
            let context = || format!("{} predictions of run {}", dataset.display_name(), run.handle);

            let table = run.predictions_for(*dataset).ok_or_else(|| {
                ChallengeError::from(StoreError::FileNotFound {
                    path: PathBuf::from(&run.handle.team_folder)
                        .join(&run.handle.run_name)
                        .join(dataset.prediction_file_name()),
                })
            })?;

            let predictions = SchemaValidator::validate(table, &truth.expected)
                .map_err(|e| ChallengeError::from(e).context(context()))?;
            let score = Scorer::score_assignments(&predictions, &truth.labels)
                .map_err(|e| ChallengeError::from(e).context(context()))?;

            debug!(run = %run.handle, dataset = %dataset, score, "Scored dataset");
            scores.insert(*dataset, score);
        }

        Ok(scores)
    }
}
