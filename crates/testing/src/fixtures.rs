//! Test fixtures for generating domain entities with realistic data.
//!
//! Every fixture shares one small ground truth: four graphs per dataset with
//! both classes present, so perfect and degenerate submissions have
//! hand-checkable macro F1 scores.

use crate::builders::{MetadataBuilder, RunBuilder, TableBuilder};
use fake::{faker::lorem::en::Word, Fake};
use graph_challenge_domain::{
    Dataset, ExpectedIds, GraphId, Metadata, Run, Table, METADATA_FILE_NAME,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Hidden `(graph_id, target)` labels for a dataset
pub fn test_labels(dataset: Dataset) -> Vec<(i64, i64)> {
    match dataset {
        Dataset::Proteins => vec![(1, 0), (2, 1), (3, 0), (4, 1)],
        Dataset::Mutag => vec![(101, 1), (102, 1), (103, 0), (104, 0)],
    }
}

/// Expected graph ids for a dataset, in file order
pub fn test_ids(dataset: Dataset) -> Vec<i64> {
    test_labels(dataset).into_iter().map(|(id, _)| id).collect()
}

pub fn create_test_expected_ids(dataset: Dataset) -> ExpectedIds {
    test_ids(dataset).into_iter().map(GraphId::new).collect()
}

pub fn create_test_label_table(dataset: Dataset) -> Table {
    TableBuilder::new().assignments(&test_labels(dataset)).build()
}

/// Predictions equal to the labels, in reverse row order. Scores 1.0.
pub fn create_perfect_predictions(dataset: Dataset) -> Table {
    let mut pairs = test_labels(dataset);
    pairs.reverse();
    TableBuilder::new().assignments(&pairs).build()
}

/// Predict one class for every graph. Scores 1/3 with either class.
pub fn create_constant_predictions(dataset: Dataset, class: i64) -> Table {
    let pairs: Vec<(i64, i64)> = test_ids(dataset).into_iter().map(|id| (id, class)).collect();
    TableBuilder::new().assignments(&pairs).build()
}

/// Metadata for `team` with a randomly named model
pub fn create_test_metadata(team: &str) -> Metadata {
    let model: String = Word().fake();
    MetadataBuilder::new().with_team(team).with_model(model).build()
}

/// A run whose predictions are perfect on every dataset
pub fn create_perfect_run(team: &str, run_name: &str) -> Run {
    Dataset::all()
        .iter()
        .fold(RunBuilder::new(team, run_name), |builder, dataset| {
            builder.with_predictions(*dataset, create_perfect_predictions(*dataset))
        })
        .with_metadata(create_test_metadata(team))
        .build()
}

/// A run predicting `class` for every graph of every dataset
pub fn create_constant_run(team: &str, run_name: &str, class: i64) -> Run {
    Dataset::all()
        .iter()
        .fold(RunBuilder::new(team, run_name), |builder, dataset| {
            builder.with_predictions(*dataset, create_constant_predictions(*dataset, class))
        })
        .with_metadata(create_test_metadata(team))
        .build()
}

/// Render a table as comma-separated text with a header row
pub fn table_to_csv(table: &Table) -> String {
    let mut out = table.columns().join(",");
    out.push('\n');
    for row in table.rows() {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Write a run as `<inbox>/<team>/<run>/` with its prediction files and
/// `metadata.json`. Returns the run directory.
pub fn write_run_dir(inbox: &Path, run: &Run) -> io::Result<PathBuf> {
    let run_dir = inbox.join(&run.handle.team_folder).join(&run.handle.run_name);
    fs::create_dir_all(&run_dir)?;

    for (dataset, table) in &run.predictions {
        fs::write(run_dir.join(dataset.prediction_file_name()), table_to_csv(table))?;
    }

    let metadata = MetadataBuilder::new()
        .with_team(run.metadata.team.clone())
        .with_model(run.metadata.model.clone())
        .with_model_type(run.metadata.model_type)
        .with_runtime_minutes(run.metadata.runtime_minutes.clone())
        .to_json();
    fs::write(run_dir.join(METADATA_FILE_NAME), metadata.to_string())?;

    Ok(run_dir)
}

/// Write the fixture ground truth: `<data_dir>/<dataset>/test.csv` and
/// `<labels_dir>/<dataset>_test_labels.csv` for every dataset.
///
/// The expected-ID files carry an extra column, as real split files do.
pub fn write_ground_truth(data_dir: &Path, labels_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(labels_dir)?;

    for dataset in Dataset::all() {
        let split_dir = data_dir.join(dataset.as_str());
        fs::create_dir_all(&split_dir)?;

        let mut test_csv = String::from("graph_id,num_nodes\n");
        for id in test_ids(*dataset) {
            test_csv.push_str(&format!("{},{}\n", id, 10 + id % 7));
        }
        fs::write(split_dir.join("test.csv"), test_csv)?;

        fs::write(
            labels_dir.join(dataset.labels_file_name()),
            table_to_csv(&create_test_label_table(*dataset)),
        )?;
    }

    Ok(())
}
