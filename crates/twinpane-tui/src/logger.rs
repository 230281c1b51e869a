//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory (for development convenience)
//! - Release builds: cache directory (~/.cache/twinpane/ on Linux)

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

/// Get the log file path based on build type
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("twinpane-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        twinpane_config::paths::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

/// Level named by `RUST_LOG`, else by the config, else `Info`.
fn resolve_level(env: Option<&str>, configured: &str) -> LevelFilter {
    env.and_then(|v| v.parse::<LevelFilter>().ok())
        .or_else(|| configured.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize file-based logging
///
/// `RUST_LOG` wins over the configured level. Returns the path to the log
/// file.
pub fn init(configured_level: &str) -> Result<PathBuf> {
    let log_file = log_file_path();

    let level = resolve_level(std::env::var("RUST_LOG").ok().as_deref(), configured_level);

    // Configure simplelog with timestamps
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}
