//! Leaderboard commands

use anyhow::Result;
use colored::Colorize;
use graph_challenge_application::{LeaderboardService, RebuildReport};
use graph_challenge_infrastructure::{FsLeaderboardStore, FsRunStore};
use std::sync::Arc;

use crate::commands::CommandContext;
use crate::output::{colors, spinner, JsonFormatter, LeaderboardFormatter, OutputFormat, TableFormatter};

fn service(ctx: &CommandContext) -> LeaderboardService {
    LeaderboardService::new(
        Arc::new(FsRunStore::new(&ctx.config.paths.inbox)),
        Arc::new(ctx.ground_truth()),
        Arc::new(FsLeaderboardStore::new(&ctx.config.paths.leaderboard_csv)),
        ctx.pipeline_config(),
    )
}

/// Score every valid run in the inbox and rewrite the leaderboard
pub async fn rebuild(ctx: &CommandContext) -> Result<()> {
    ctx.require_labels_dir()?;

    let sp = spinner("Scoring submissions...");
    let result = service(ctx).rebuild().await;
    sp.finish_and_clear();
    let report = result?;

    print_summary(ctx, &report);

    if !report.is_complete() {
        anyhow::bail!(
            "{} run(s) could not be scored and were left off the leaderboard",
            report.failures.len()
        );
    }
    Ok(())
}

fn print_summary(ctx: &CommandContext, report: &RebuildReport) {
    println!(
        "{} {} row(s) to {}",
        colors::success("Leaderboard written:"),
        report.rows.len(),
        ctx.config.paths.leaderboard_csv.display()
    );

    if report.failures.is_empty() {
        return;
    }

    eprintln!(
        "{}",
        colors::warning(&format!("{} run(s) failed:", report.failures.len())).bold()
    );
    let rows = report
        .failures
        .iter()
        .map(|failure| {
            vec![
                failure.team.clone(),
                failure.handle.run_name.clone(),
                failure.error.error_code().to_string(),
                failure.error.to_string(),
            ]
        })
        .collect();
    eprintln!(
        "{}",
        TableFormatter::simple(vec!["Team", "Run", "Code", "Error"], rows)
    );
}

/// Print the current leaderboard file
pub async fn show(ctx: &CommandContext) -> Result<()> {
    let rows = service(ctx).current().await?;
    let precision = ctx.pipeline_config().precision;

    if rows.is_empty() && ctx.format != OutputFormat::Json {
        println!("{}", colors::warning("No entries yet."));
        return Ok(());
    }

    match ctx.format {
        OutputFormat::Json => println!("{}", JsonFormatter::format(&rows)?),
        format => {
            println!("{}", colors::bold("Leaderboard"));
            println!("{}", colors::dim(&ctx.config.paths.leaderboard_csv.display().to_string()));
            println!();
            println!("{}", LeaderboardFormatter::format(&rows, precision, format)?);
        }
    }
    Ok(())
}
