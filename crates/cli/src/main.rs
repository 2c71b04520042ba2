//! Graph Challenge CLI
//!
//! Validates and scores graph classification submissions, enforces the
//! one-attempt-per-team policy, and rebuilds the published leaderboard.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use graph_challenge_cli::commands::{leaderboard, policy, score, validate, CommandContext};
use graph_challenge_cli::output::OutputFormat;
use graph_challenge_common::{init_tracing, BatchMode, ChallengeConfig};
use graph_challenge_domain::{ChallengeError, Dataset};

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

/// Challenge dataset
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CliDataset {
    Proteins,
    Mutag,
}

impl From<CliDataset> for Dataset {
    fn from(d: CliDataset) -> Self {
        match d {
            CliDataset::Proteins => Dataset::Proteins,
            CliDataset::Mutag => Dataset::Mutag,
        }
    }
}

/// Failure handling for leaderboard rebuilds
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CliBatchMode {
    /// Abort on the first failing run
    Strict,
    /// Publish the runs that scored and report the rest
    Isolate,
}

impl From<CliBatchMode> for BatchMode {
    fn from(m: CliBatchMode) -> Self {
        match m {
            CliBatchMode::Strict => BatchMode::Strict,
            CliBatchMode::Isolate => BatchMode::Isolate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "graph-challenge")]
#[command(author, version, about = "Graph classification challenge tooling")]
#[command(long_about = "Scoring and leaderboard tooling for the graph classification challenge.\n\n\
    Validate prediction files, score submissions with macro-F1, enforce the \
    one-attempt-per-team policy, and rebuild the anonymized leaderboard.")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file layered over config/default.toml
    #[arg(long, global = true, env = "CHALLENGE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    format: CliOutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a prediction file against the expected test ids
    Validate {
        /// Prediction CSV with columns graph_id,target
        #[arg(value_name = "PREDICTIONS")]
        predictions: PathBuf,

        /// Dataset the predictions are for
        #[arg(short, long, value_enum)]
        dataset: CliDataset,

        /// Public data directory holding <dataset>/test.csv
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Validate and score one prediction file against a labels file
    Score {
        /// Prediction CSV with columns graph_id,target
        #[arg(value_name = "PREDICTIONS")]
        predictions: PathBuf,

        /// Private labels CSV with columns graph_id,target
        #[arg(value_name = "LABELS")]
        labels: PathBuf,

        /// Dataset the predictions are for
        #[arg(short, long, value_enum)]
        dataset: CliDataset,

        /// Public data directory holding <dataset>/test.csv
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Score a single run folder and print its JSON score record
    ScoreRun {
        /// Run folder holding predictions_<dataset>.csv files
        #[arg(long)]
        run_dir: PathBuf,

        /// The run's metadata.json
        #[arg(long)]
        metadata: PathBuf,

        /// Private labels directory
        #[arg(long, env = "CHALLENGE_PATHS__LABELS_DIR")]
        labels_dir: Option<PathBuf>,

        /// Public data directory holding <dataset>/test.csv
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Pull request the run came from, recorded in logs
        #[arg(long)]
        pr_number: Option<u64>,
    },

    /// Enforce the one-attempt-per-team policy over the inbox
    CheckPolicy {
        /// Submission inbox
        #[arg(long)]
        inbox: Option<PathBuf>,
    },

    /// Score every run in the inbox and rewrite the leaderboard
    #[command(alias = "rebuild")]
    RebuildLeaderboard {
        /// Private labels directory
        #[arg(long, env = "CHALLENGE_PATHS__LABELS_DIR")]
        labels_dir: Option<PathBuf>,

        /// Submission inbox
        #[arg(long)]
        inbox: Option<PathBuf>,

        /// Public data directory holding <dataset>/test.csv
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Leaderboard CSV to write
        #[arg(long)]
        output: Option<PathBuf>,

        /// What to do when a run fails validation or scoring
        #[arg(long, value_enum)]
        batch_mode: Option<CliBatchMode>,
    },

    /// Print the current leaderboard
    #[command(alias = "lb")]
    ShowLeaderboard {
        /// Leaderboard CSV to read
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Apply per-command path flags over the loaded configuration
fn apply_overrides(config: &mut ChallengeConfig, command: &Commands) {
    let paths = &mut config.paths;
    match command {
        Commands::Validate { data_dir, .. } | Commands::Score { data_dir, .. } => {
            if let Some(dir) = data_dir {
                paths.data_dir = dir.clone();
            }
        }
        Commands::ScoreRun {
            labels_dir,
            data_dir,
            ..
        } => {
            if let Some(dir) = data_dir {
                paths.data_dir = dir.clone();
            }
            if let Some(dir) = labels_dir {
                paths.labels_dir = Some(dir.clone());
            }
        }
        Commands::CheckPolicy { inbox } => {
            if let Some(dir) = inbox {
                paths.inbox = dir.clone();
            }
        }
        Commands::RebuildLeaderboard {
            labels_dir,
            inbox,
            data_dir,
            output,
            batch_mode,
        } => {
            if let Some(dir) = labels_dir {
                paths.labels_dir = Some(dir.clone());
            }
            if let Some(dir) = inbox {
                paths.inbox = dir.clone();
            }
            if let Some(dir) = data_dir {
                paths.data_dir = dir.clone();
            }
            if let Some(file) = output {
                paths.leaderboard_csv = file.clone();
            }
            if let Some(mode) = batch_mode {
                config.scoring.batch_mode = (*mode).into();
            }
        }
        Commands::ShowLeaderboard { output } => {
            if let Some(file) = output {
                paths.leaderboard_csv = file.clone();
            }
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load configuration
    let mut config = ChallengeConfig::load(cli.config.as_deref())
        .map_err(|e| ChallengeError::Configuration(format!("{:#}", e)))?;
    apply_overrides(&mut config, &cli.command);

    // Initialize tracing
    let log_level = match (&cli.log_level, cli.verbose) {
        (Some(level), _) => level.clone(),
        (None, true) => "debug".to_string(),
        (None, false) => config.telemetry.log_level.clone(),
    };
    init_tracing(cli.json_logs || config.telemetry.json_logging, &log_level)?;

    let ctx = CommandContext::new(config, cli.format.into());

    // Execute command
    match cli.command {
        Commands::Validate {
            predictions,
            dataset,
            ..
        } => validate::validate(&ctx, &predictions, dataset.into()).await,
        Commands::Score {
            predictions,
            labels,
            dataset,
            ..
        } => score::score(&ctx, &predictions, &labels, dataset.into()).await,
        Commands::ScoreRun {
            run_dir,
            metadata,
            pr_number,
            ..
        } => score::score_run(&ctx, &run_dir, &metadata, pr_number).await,
        Commands::CheckPolicy { .. } => policy::check_policy(&ctx).await,
        Commands::RebuildLeaderboard { .. } => leaderboard::rebuild(&ctx).await,
        Commands::ShowLeaderboard { .. } => leaderboard::show(&ctx).await,
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup colored output
    if cli.no_color {
        colored::control::set_override(false);
    }
    let verbose = cli.verbose;

    // Handle errors
    if let Err(e) = run(cli).await {
        let exit_code = match e.downcast_ref::<ChallengeError>() {
            Some(err) => {
                eprintln!("{} [{}] {}", "Error:".red().bold(), err.error_code(), err);
                err.exit_code()
            }
            None => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                1
            }
        };
        if verbose {
            eprintln!("\n{}", "Details:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rebuild_flags_override_config() {
        let cli = Cli::parse_from([
            "graph-challenge",
            "rebuild-leaderboard",
            "--labels-dir",
            "/secrets/labels",
            "--inbox",
            "inbox",
            "--output",
            "out.csv",
            "--batch-mode",
            "isolate",
        ]);
        let mut config = ChallengeConfig::default();

        apply_overrides(&mut config, &cli.command);

        assert_eq!(config.paths.labels_dir, Some(PathBuf::from("/secrets/labels")));
        assert_eq!(config.paths.inbox, PathBuf::from("inbox"));
        assert_eq!(config.paths.leaderboard_csv, PathBuf::from("out.csv"));
        assert_eq!(config.scoring.batch_mode, BatchMode::Isolate);
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_dataset_selector_is_restricted() {
        let result = Cli::try_parse_from([
            "graph-challenge",
            "validate",
            "predictions.csv",
            "--dataset",
            "cora",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_takes_two_paths() {
        let cli = Cli::parse_from([
            "graph-challenge",
            "score",
            "pred.csv",
            "labels.csv",
            "-d",
            "mutag",
        ]);

        match cli.command {
            Commands::Score {
                predictions,
                labels,
                dataset,
                ..
            } => {
                assert_eq!(predictions, PathBuf::from("pred.csv"));
                assert_eq!(labels, PathBuf::from("labels.csv"));
                assert_eq!(Dataset::from(dataset), Dataset::Mutag);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
