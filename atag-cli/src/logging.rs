//! Tracing subscriber setup
//!
//! Console output goes to stderr, filtered by `RUST_LOG` or the `-v` count.
//! Session logs go to one file per run under `<root>/logs/`, filtered by
//! the configured level.

use anyhow::{Context, Result};
use atag_common::config::LoggingConfig;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

/// Console filter directive for a `-v` count
pub fn console_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Session log path: the configured file, else `<logs_dir>/<YYYYMMDD_HHMMSS>.log`
pub fn session_log_path(config: &LoggingConfig, logs_dir: &Path) -> Option<PathBuf> {
    if let Some(file) = &config.file {
        return Some(file.clone());
    }
    if !config.session_logs {
        return None;
    }
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    Some(logs_dir.join(format!("{}.log", stamp)))
}

/// Install the global subscriber; returns the session log path if one is open
pub fn init(verbosity: u8, config: &LoggingConfig, logs_dir: &Path) -> Result<Option<PathBuf>> {
    let console_filter = if verbosity == 0 {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(console_directive(verbosity)))
    } else {
        EnvFilter::new(console_directive(verbosity))
    };
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let log_path = session_log_path(config, logs_dir);
    let file_layer = match &log_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log folder {}", parent.display()))?;
            }
            let file: File = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let file_filter = EnvFilter::try_new(&config.level)
                .with_context(|| format!("Invalid logging level '{}'", config.level))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(file_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_path)
}
