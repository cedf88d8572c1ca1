//! Tracing setup for applications embedding the engine.
//!
//! The engine itself only emits debug-level `tracing` events at operation
//! boundaries and never formats user-facing messages. Embedders that want
//! those events on disk can call [`init`] once at startup; library users with
//! their own subscriber should skip this module entirely.

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Platform log directory (`<data dir>/quarry/logs`), created on demand.
pub fn log_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to determine data directory")?;
    let dir = base.join("quarry").join("logs");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize console plus daily-rolling file output.
///
/// The filter defaults to `info` and honors `RUST_LOG`.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created, the file
/// appender cannot be built, or a global subscriber is already set.
pub fn init() -> Result<()> {
    let dir = log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix("quarry")
        .filename_suffix("log")
        .build(&dir)
        .context("Failed to create log file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer().with_target(true);
    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to set global tracing subscriber")?;

    tracing::info!("Logging initialized, log directory: {}", dir.display());
    Ok(())
}
