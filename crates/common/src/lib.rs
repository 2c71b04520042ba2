//! Common utilities shared by the graph challenge crates.
//!
//! This crate provides:
//! - Configuration management (layered files + environment)
//! - Telemetry and structured logging setup

pub mod config;
pub mod telemetry;

// Re-export commonly used types
pub use config::{BatchMode, ChallengeConfig, PathsConfig, ScoringConfig, TelemetryConfig};
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
