//! Validate command

use anyhow::Result;
use graph_challenge_domain::Dataset;
use graph_challenge_infrastructure::read_table;
use std::path::Path;
use tracing::info;

use crate::commands::CommandContext;

/// Check one prediction file against the expected ids of `dataset`
pub async fn validate(ctx: &CommandContext, predictions: &Path, dataset: Dataset) -> Result<()> {
    let table = read_table(predictions).await?;

    ctx.submission_service()
        .validate_predictions(dataset, &table)
        .await
        .map_err(|e| {
            e.context(format!(
                "{} predictions {}",
                dataset.display_name(),
                predictions.display()
            ))
        })?;

    info!(path = %predictions.display(), dataset = %dataset, "Validation passed");
    println!("VALID SUBMISSION");
    Ok(())
}
