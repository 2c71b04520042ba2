//! Graph Challenge CLI Library
//!
//! Command implementations and output formatting behind the
//! `graph-challenge` binary. Commands return `anyhow::Result`; typed
//! [`ChallengeError`](graph_challenge_domain::ChallengeError)s pass through
//! unchanged so the binary can report their taxonomy code.

pub mod commands;
pub mod output;

pub use commands::CommandContext;
pub use output::{JsonFormatter, LeaderboardFormatter, OutputFormat, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
