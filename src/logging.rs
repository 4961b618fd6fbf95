// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The engine itself only emits `tracing` events; initialising a subscriber
//! is strictly opt-in so embedders with their own setup are left alone.
//!
//! Priority for determining the log level:
//! 1. explicit `level` argument (if provided)
//! 2. `LAYERDAG_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs go to STDERR so stdout stays free for the embedding application.

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;

/// Initialise a global logging subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(level: Option<tracing::Level>) -> Result<()> {
    let level = match level {
        Some(lvl) => lvl,
        None => std::env::var("LAYERDAG_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to set global tracing subscriber: {e}"))
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
