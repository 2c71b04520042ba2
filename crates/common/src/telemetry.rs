//! Logging setup.
//!
//! All diagnostics are written to stderr through `tracing`. Stdout is kept
//! free for machine-readable results such as `SCORE=...` lines and JSON
//! score records, which CI jobs capture verbatim.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `json_format` - Emit one JSON object per event instead of text lines
/// * `log_level` - Default filter (e.g. "info", "debug"); `RUST_LOG` overrides it
///
/// # Examples
///
/// ```no_run
/// use graph_challenge_common::telemetry::init_tracing;
///
/// init_tracing(false, "info").expect("Failed to initialize tracing");
/// ```
pub fn init_tracing(json_format: bool, log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = Registry::default().with(env_filter);

    if json_format {
        registry
            .with(json_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    } else {
        registry
            .with(text_layer())
            .try_init()
            .context("Failed to initialize tracing subscriber")?;
    }

    Ok(())
}

fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_level(true)
}

fn text_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_fails_cleanly() {
        // A subscriber can only be installed once per process, so the first
        // call may succeed or fail depending on test ordering. The second
        // call must fail with an error rather than panic.
        let _ = init_tracing(false, "info");
        assert!(init_tracing(true, "debug").is_err());
    }
}
