//! Policy check command

use anyhow::Result;
use graph_challenge_application::enumerate_valid_runs;
use graph_challenge_domain::ValidRun;
use graph_challenge_infrastructure::FsRunStore;
use std::path::Path;

use crate::commands::CommandContext;
use crate::output::{colors, JsonFormatter, OutputFormat, TableFormatter};

/// Enforce the one-attempt-per-team policy over the inbox
pub async fn check_policy(ctx: &CommandContext) -> Result<()> {
    let store = FsRunStore::new(&ctx.config.paths.inbox);
    let runs = enumerate_valid_runs(&store).await?;

    println!("{}", render_report(&runs, store.inbox(), ctx.format)?);
    Ok(())
}

/// Stdout text of a passing policy check.
///
/// JSON output is the bare run list so it can be piped into other tools.
pub fn render_report(runs: &[ValidRun], inbox: &Path, format: OutputFormat) -> Result<String> {
    let summary = format!(
        "{} {} valid run(s) in {}",
        colors::success("Policy check passed:"),
        runs.len(),
        inbox.display()
    );

    match format {
        OutputFormat::Json => JsonFormatter::format(&runs),
        OutputFormat::Table if !runs.is_empty() => {
            let rows = runs
                .iter()
                .map(|run| {
                    vec![
                        run.team().to_string(),
                        run.handle.run_name.clone(),
                        run.metadata.model.clone(),
                        run.metadata.model_type.to_string(),
                    ]
                })
                .collect();
            let table = TableFormatter::simple(vec!["Team", "Run", "Model", "Type"], rows);
            Ok(format!("{}\n{}", table, summary))
        }
        _ => Ok(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_challenge_domain::RunHandle;
    use graph_challenge_testing::create_test_metadata;

    fn valid_runs() -> Vec<ValidRun> {
        ["alpha", "beta"]
            .iter()
            .map(|team| ValidRun {
                handle: RunHandle::new(*team, "run-1"),
                metadata: create_test_metadata(team),
            })
            .collect()
    }

    #[test]
    fn test_json_report_is_only_json() {
        let runs = valid_runs();

        let text = render_report(&runs, Path::new("inbox"), OutputFormat::Json).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
        assert!(!text.contains("Policy check passed"));
    }

    #[test]
    fn test_table_report_ends_with_summary() {
        colored::control::set_override(false);
        let runs = valid_runs();

        let text = render_report(&runs, Path::new("inbox"), OutputFormat::Table).unwrap();

        assert!(text.contains("alpha"));
        assert!(text.ends_with("Policy check passed: 2 valid run(s) in inbox"));
    }

    #[test]
    fn test_plain_report_without_runs() {
        colored::control::set_override(false);

        let text = render_report(&[], Path::new("inbox"), OutputFormat::Plain).unwrap();

        assert_eq!(text, "Policy check passed: 0 valid run(s) in inbox");
    }
}
