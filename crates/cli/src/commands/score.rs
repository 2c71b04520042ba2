//! Scoring commands
//!
//! `score` checks a single prediction file against a labels file.
//! `score_run` scores one run folder, typically the run added by a pull
//! request, and prints its JSON score record for CI to pick up.

use anyhow::Result;
use graph_challenge_domain::{format_score, Dataset};
use graph_challenge_infrastructure::{read_table, FsRunStore};
use std::path::Path;
use tracing::info;

use crate::commands::CommandContext;
use crate::output::JsonFormatter;

/// Validate and score one prediction file, printing `SCORE=<score>`
pub async fn score(
    ctx: &CommandContext,
    predictions: &Path,
    labels: &Path,
    dataset: Dataset,
) -> Result<()> {
    let predictions_table = read_table(predictions).await?;
    let labels_table = read_table(labels).await?;

    let score = ctx
        .submission_service()
        .score_predictions(dataset, &predictions_table, &labels_table)
        .await
        .map_err(|e| {
            e.context(format!(
                "{} predictions {}",
                dataset.display_name(),
                predictions.display()
            ))
        })?;

    println!("SCORE={}", format_score(score, ctx.pipeline_config().precision));
    Ok(())
}

/// Score a run folder and print its score record as one JSON line
pub async fn score_run(
    ctx: &CommandContext,
    run_dir: &Path,
    metadata: &Path,
    pr_number: Option<u64>,
) -> Result<()> {
    ctx.require_labels_dir()?;

    let run = FsRunStore::load_run_dir(run_dir, metadata).await?;
    info!(
        run = %run.handle,
        team = %run.metadata.team,
        pr_number = ?pr_number,
        "Scoring submission"
    );

    let report = ctx.submission_service().score_run(&run).await?;

    println!("{}", JsonFormatter::line(&report)?);
    Ok(())
}
