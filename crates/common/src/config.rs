//! Configuration management for the challenge tooling.
//!
//! Settings are loaded from layered sources, later ones overriding earlier:
//!
//! 1. Built-in defaults
//! 2. `config/default.toml` (if it exists)
//! 3. `config/{CHALLENGE_ENV}.toml` (if it exists)
//! 4. An explicit file passed with `--config`
//! 5. Environment variables prefixed with `CHALLENGE_`, using `__` between
//!    sections, e.g. `CHALLENGE_PATHS__LABELS_DIR=/secrets/labels`
//!
//! Command-line flags are applied on top by the CLI.
//!
//! ## Example Configuration
//!
//! ```toml
//! [paths]
//! inbox = "submissions/inbox"
//! data_dir = "data"
//! labels_dir = "/secrets/labels"
//! leaderboard_csv = "leaderboard/leaderboard.csv"
//!
//! [scoring]
//! batch_mode = "strict"
//! precision = 8
//!
//! [telemetry]
//! json_logging = false
//! log_level = "info"
//! ```

use anyhow::{Context, Result};
use graph_challenge_domain::SCORE_PRECISION;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Locations of the inbox, public data, private labels, and output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the `<team>/<run>/` submission tree
    #[serde(default = "default_inbox")]
    pub inbox: PathBuf,

    /// Public data directory holding `<dataset>/test.csv`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Private labels directory, supplied out-of-band by organizers
    #[serde(default)]
    pub labels_dir: Option<PathBuf>,

    /// Leaderboard CSV written by a rebuild
    #[serde(default = "default_leaderboard_csv")]
    pub leaderboard_csv: PathBuf,
}

/// Scoring behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// What a rebuild does when one run fails validation or scoring
    #[serde(default)]
    pub batch_mode: BatchMode,

    /// Decimal digits for published scores
    #[serde(default = "default_precision")]
    pub precision: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Failure handling for leaderboard rebuilds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchMode {
    /// Abort the whole rebuild on the first failing run and write nothing
    #[default]
    Strict,
    /// Skip failing runs, publish the rest, and report every failure
    Isolate,
}

impl BatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Isolate => "isolate",
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Default value functions
fn default_inbox() -> PathBuf {
    PathBuf::from("submissions/inbox")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_leaderboard_csv() -> PathBuf {
    PathBuf::from("leaderboard/leaderboard.csv")
}

fn default_precision() -> u32 {
    SCORE_PRECISION
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            inbox: default_inbox(),
            data_dir: default_data_dir(),
            labels_dir: None,
            leaderboard_csv: default_leaderboard_csv(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            batch_mode: BatchMode::default(),
            precision: default_precision(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

impl ChallengeConfig {
    /// Load configuration from the standard layered sources.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use graph_challenge_common::config::ChallengeConfig;
    ///
    /// let config = ChallengeConfig::load(None).expect("Failed to load configuration");
    /// println!("Reading submissions from {}", config.paths.inbox.display());
    /// ```
    pub fn load(explicit_file: Option<&Path>) -> Result<Self> {
        let env = std::env::var("CHALLENGE_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false));

        if let Some(path) = explicit_file {
            if !path.exists() {
                anyhow::bail!("Missing configuration file: {}", path.display());
            }
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            // Example: CHALLENGE_SCORING__BATCH_MODE=isolate
            .add_source(
                config::Environment::with_prefix("CHALLENGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let challenge_config: ChallengeConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        challenge_config.validate()?;

        Ok(challenge_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(1..=15).contains(&self.scoring.precision) {
            anyhow::bail!(
                "Score precision must be between 1 and 15 digits, got {}",
                self.scoring.precision
            );
        }

        if self.paths.inbox.as_os_str().is_empty() {
            anyhow::bail!("Inbox path must not be empty");
        }

        if self.paths.leaderboard_csv.as_os_str().is_empty() {
            anyhow::bail!("Leaderboard output path must not be empty");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }
}
