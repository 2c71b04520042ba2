//! Policy Enforcer - one valid run per team
//!
//! [`enumerate_valid_runs`] is the single place that decides which runs
//! take part in the competition. Both the standalone policy check and the
//! leaderboard rebuild go through it, so they can never disagree.
//!
//! The enforcer is read-only: it classifies runs and reports violations
//! but never touches the store's contents.

use crate::ports::RunStore;
use crate::ApplicationResult;
use graph_challenge_domain::{ChallengeError, PolicyError, RunHandle, ValidRun};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Enumerate the runs that count, enforcing the submission policy.
///
/// Processes team folders in sorted order. Incomplete runs are skipped as
/// work in progress. Every complete run must have valid metadata whose
/// `team` equals its folder, and a folder may hold at most one complete
/// run. Finally the metadata-declared teams across all valid runs must be
/// unique.
#[instrument(skip(store))]
pub async fn enumerate_valid_runs(store: &dyn RunStore) -> ApplicationResult<Vec<ValidRun>> {
    let mut handles = store.list_runs().await?;
    handles.sort();

    let mut by_folder: BTreeMap<String, Vec<RunHandle>> = BTreeMap::new();
    for handle in handles {
        by_folder.entry(handle.team_folder.clone()).or_default().push(handle);
    }

    let mut valid_runs = Vec::new();
    for (team_folder, handles) in by_folder {
        let mut folder_runs = Vec::new();

        for handle in handles {
            if !handle.is_complete() {
                debug!(
                    run = %handle,
                    missing = ?handle.missing_artifacts,
                    "Skipping incomplete run"
                );
                continue;
            }

            let metadata = store
                .load_metadata(&handle)
                .await
                .map_err(|e| e.context(format!("Run {}", handle)))?;

            if metadata.team != team_folder {
                return Err(PolicyError::TeamFolderMismatch {
                    team_folder,
                    declared: metadata.team,
                    run: handle.to_string(),
                }
                .into());
            }

            folder_runs.push(ValidRun { handle, metadata });
        }

        if folder_runs.len() > 1 {
            return Err(PolicyError::MultipleAttempts {
                team: team_folder,
                attempts: folder_runs.len(),
            }
            .into());
        }

        valid_runs.extend(folder_runs);
    }

    ensure_one_attempt_per_team(&valid_runs)?;

    info!(valid_runs = valid_runs.len(), "Submission policy satisfied");
    Ok(valid_runs)
}

/// Fail if any metadata-declared team owns more than one run.
///
/// Duplicate teams are reported in sorted order.
pub fn ensure_one_attempt_per_team(runs: &[ValidRun]) -> Result<(), ChallengeError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for run in runs {
        *counts.entry(run.team()).or_default() += 1;
    }

    let teams: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(team, _)| team.to_string())
        .collect();

    if teams.is_empty() {
        Ok(())
    } else {
        Err(PolicyError::DuplicateTeamAttempt { teams }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_challenge_domain::{Metadata, ModelType};

    fn valid_run(folder: &str, run: &str, team: &str) -> ValidRun {
        ValidRun {
            handle: RunHandle::new(folder, run),
            metadata: Metadata {
                team: team.to_string(),
                model: "gin".to_string(),
                model_type: ModelType::Human,
                runtime_minutes: "5".to_string(),
            },
        }
    }

    #[test]
    fn test_unique_teams_pass() {
        let runs = vec![valid_run("alpha", "r1", "alpha"), valid_run("beta", "r1", "beta")];
        assert!(ensure_one_attempt_per_team(&runs).is_ok());
    }

    #[test]
    fn test_duplicate_declared_team_is_reported() {
        // Arrange: a flat run list where two handles declare the same team
        let runs = vec![
            valid_run("gamma", "r1", "gamma"),
            valid_run("alpha", "r1", "alpha"),
            valid_run("alpha-mirror", "r1", "alpha"),
            valid_run("gamma-mirror", "r1", "gamma"),
        ];

        // Act
        let err = ensure_one_attempt_per_team(&runs).unwrap_err();

        // Assert
        assert_eq!(err.error_code(), "DUPLICATE_TEAM_ATTEMPT");
        match err {
            ChallengeError::Policy(PolicyError::DuplicateTeamAttempt { teams }) => {
                assert_eq!(teams, vec!["alpha".to_string(), "gamma".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_run_list_passes() {
        assert!(ensure_one_attempt_per_team(&[]).is_ok());
    }
}
