//! Integration tests for the filesystem stores
//!
//! Builds real inbox, data, and labels directories in temporary folders and
//! drives the full rebuild through them.

use graph_challenge_application::{
    enumerate_valid_runs, GroundTruthStore, LeaderboardService, LeaderboardStore, PipelineConfig,
    RunStore, SubmissionService,
};
use graph_challenge_domain::{Dataset, LeaderboardRow, RunHandle, METADATA_FILE_NAME};
use graph_challenge_infrastructure::{FsGroundTruth, FsLeaderboardStore, FsRunStore};
use graph_challenge_testing::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

struct Workspace {
    _root: TempDir,
    inbox: PathBuf,
    data_dir: PathBuf,
    labels_dir: PathBuf,
    output: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let inbox = root.path().join("submissions/inbox");
        let data_dir = root.path().join("data");
        let labels_dir = root.path().join("private/labels");
        let output = root.path().join("leaderboard/leaderboard.csv");
        write_ground_truth(&data_dir, &labels_dir).unwrap();
        Self {
            _root: root,
            inbox,
            data_dir,
            labels_dir,
            output,
        }
    }

    fn service(&self) -> LeaderboardService {
        LeaderboardService::new(
            Arc::new(FsRunStore::new(&self.inbox)),
            Arc::new(FsGroundTruth::new(&self.data_dir).with_labels_dir(&self.labels_dir)),
            Arc::new(FsLeaderboardStore::new(&self.output)),
            PipelineConfig::default(),
        )
    }

    fn output_text(&self) -> String {
        fs::read_to_string(&self.output).unwrap()
    }
}

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

// ============================================================================
// Run store
// ============================================================================

#[tokio::test]
async fn test_missing_inbox_lists_no_runs() {
    let store = FsRunStore::new("/nonexistent/inbox");

    let runs = store.list_runs().await.unwrap();

    assert!(runs.is_empty());
}

#[tokio::test]
async fn test_list_runs_sorted_with_missing_artifacts() {
    // Arrange
    let ws = Workspace::new();
    write_run_dir(&ws.inbox, &create_perfect_run("beta", "run-1")).unwrap();
    write_run_dir(&ws.inbox, &create_perfect_run("alpha", "run-2")).unwrap();
    let partial = ws.inbox.join("alpha/run-1");
    write_file(&partial.join("predictions_mutag.csv"), "graph_id,target\n");
    write_file(&ws.inbox.join("README.md"), "stray file");
    write_file(&ws.inbox.join("alpha/notes.txt"), "stray file");

    // Act
    let runs = FsRunStore::new(&ws.inbox).list_runs().await.unwrap();

    // Assert
    let names: Vec<String> = runs.iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["alpha/run-1", "alpha/run-2", "beta/run-1"]);
    assert_eq!(
        runs[0].missing_artifacts,
        vec!["predictions_proteins.csv".to_string(), METADATA_FILE_NAME.to_string()]
    );
    assert!(runs[1].is_complete());
}

#[tokio::test]
async fn test_load_run_round_trips_written_run() {
    let ws = Workspace::new();
    let run = create_constant_run("alpha", "run-1", 1);
    write_run_dir(&ws.inbox, &run).unwrap();

    let loaded = FsRunStore::new(&ws.inbox)
        .load_run(&RunHandle::new("alpha", "run-1"))
        .await
        .unwrap();

    assert_eq!(loaded.metadata, run.metadata);
    assert_eq!(loaded.predictions, run.predictions);
}

#[tokio::test]
async fn test_malformed_metadata_names_file() {
    let ws = Workspace::new();
    let run_dir = write_run_dir(&ws.inbox, &create_perfect_run("alpha", "run-1")).unwrap();
    fs::write(run_dir.join(METADATA_FILE_NAME), "[1, 2, 3]").unwrap();

    let err = enumerate_valid_runs(&FsRunStore::new(&ws.inbox)).await.unwrap_err();

    assert_eq!(err.error_code(), "MALFORMED_METADATA");
    assert!(err.to_string().contains("metadata.json"));
}

#[tokio::test]
async fn test_load_run_dir_reports_missing_inputs_in_order() {
    let ws = Workspace::new();
    let run_dir = write_run_dir(&ws.inbox, &create_perfect_run("alpha", "run-1")).unwrap();
    let metadata = run_dir.join(METADATA_FILE_NAME);

    let err = FsRunStore::load_run_dir(&ws.inbox.join("alpha/missing"), &ws.inbox.join("nope.json"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("nope.json"));

    let err = FsRunStore::load_run_dir(&ws.inbox.join("alpha/missing"), &metadata)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    assert!(err.to_string().contains("missing"));

    fs::remove_file(run_dir.join("predictions_mutag.csv")).unwrap();
    let err = FsRunStore::load_run_dir(&run_dir, &metadata).await.unwrap_err();
    assert!(err.to_string().contains("predictions_mutag.csv"));
}

// ============================================================================
// Ground truth
// ============================================================================

#[tokio::test]
async fn test_expected_ids_ignore_extra_columns() {
    let ws = Workspace::new();
    let truth = FsGroundTruth::new(&ws.data_dir);

    let ids = truth.expected_ids(Dataset::Mutag).await.unwrap();

    assert_eq!(ids, create_test_expected_ids(Dataset::Mutag));
}

#[tokio::test]
async fn test_expected_ids_require_graph_id_column() {
    let ws = Workspace::new();
    write_file(&ws.data_dir.join("proteins/test.csv"), "id,num_nodes\n1,4\n");

    let err = FsGroundTruth::new(&ws.data_dir)
        .expected_ids(Dataset::Proteins)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "MALFORMED_TABLE");
}

#[tokio::test]
async fn test_labels_without_directory_is_configuration_error() {
    let ws = Workspace::new();

    let err = FsGroundTruth::new(&ws.data_dir)
        .labels(Dataset::Proteins)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "CONFIGURATION");
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_score_run_dir_end_to_end() {
    let ws = Workspace::new();
    let run_dir = write_run_dir(&ws.inbox, &create_constant_run("alpha", "run-1", 0)).unwrap();
    let service = SubmissionService::new(
        Arc::new(FsGroundTruth::new(&ws.data_dir).with_labels_dir(&ws.labels_dir)),
        PipelineConfig::default(),
    );

    let run = FsRunStore::load_run_dir(&run_dir, &run_dir.join(METADATA_FILE_NAME))
        .await
        .unwrap();
    let report = service.score_run(&run).await.unwrap();

    assert_eq!(
        serde_json::to_string(&report).unwrap(),
        r#"{"score":0.33333333,"proteins_score":0.33333333,"mutag_score":0.33333333}"#
    );
}

// ============================================================================
// Leaderboard
// ============================================================================

#[tokio::test]
async fn test_rebuild_writes_ranked_csv() {
    // Arrange
    let ws = Workspace::new();
    write_run_dir(&ws.inbox, &create_constant_run("alpha", "run-1", 0)).unwrap();
    write_run_dir(&ws.inbox, &create_perfect_run("beta", "run-1")).unwrap();
    write_run_dir(&ws.inbox, &create_constant_run("gamma", "run-1", 1)).unwrap();

    // Act
    let report = ws.service().rebuild().await.unwrap();

    // Assert
    assert_eq!(report.rows.len(), 3);
    assert_eq!(
        ws.output_text(),
        "rank,score\n1,1.00000000\n2,0.33333333\n2,0.33333333\n"
    );
}

#[tokio::test]
async fn test_rebuild_twice_is_byte_identical() {
    let ws = Workspace::new();
    write_run_dir(&ws.inbox, &create_constant_run("alpha", "run-1", 0)).unwrap();
    write_run_dir(&ws.inbox, &create_perfect_run("beta", "run-1")).unwrap();
    let service = ws.service();

    service.rebuild().await.unwrap();
    let first = fs::read(&ws.output).unwrap();
    service.rebuild().await.unwrap();
    let second = fs::read(&ws.output).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_inbox_writes_header_only() {
    let ws = Workspace::new();

    ws.service().rebuild().await.unwrap();

    assert_eq!(ws.output_text(), "rank,score\n");
}

#[tokio::test]
async fn test_failed_strict_rebuild_keeps_previous_leaderboard() {
    let ws = Workspace::new();
    write_run_dir(&ws.inbox, &create_perfect_run("alpha", "run-1")).unwrap();
    ws.service().rebuild().await.unwrap();
    let before = ws.output_text();

    write_run_dir(&ws.inbox, &create_perfect_run("alpha", "run-2")).unwrap();
    let err = ws.service().rebuild().await.unwrap_err();

    assert_eq!(err.error_code(), "MULTIPLE_ATTEMPTS");
    assert_eq!(ws.output_text(), before);
}

#[tokio::test]
async fn test_leaderboard_store_reads_back_rows() {
    let ws = Workspace::new();
    let store = FsLeaderboardStore::new(&ws.output);
    let rows = vec![
        LeaderboardRow { rank: 1, score: 0.9 },
        LeaderboardRow { rank: 1, score: 0.9 },
        LeaderboardRow { rank: 3, score: 0.25 },
    ];

    store.write_rows(&rows, 8).await.unwrap();

    assert_eq!(store.read_rows().await.unwrap(), rows);
}
