//! File logging.
//!
//! The terminal belongs to the UI, so log output goes to
//! `<data_dir>/<app>.log`. `RUST_LOG` overrides the default filter.

use crate::error::{ShellError, ShellResult};
use crate::paths::AppPaths;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Shared crate targets that log alongside the app itself.
const SHARED_TARGETS: &[&str] = &["tui_theme", "tui_keybinds", "tui_shell"];

/// Default filter directive: `level` for the app's target and the shared crates.
pub fn default_filter(app_target: &str, level: &str) -> String {
    std::iter::once(app_target)
        .chain(SHARED_TARGETS.iter().copied())
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber, appending to the app's log file.
pub fn init_logging(paths: &AppPaths, app_target: &str, level: &str) -> ShellResult<()> {
    paths.ensure_dirs()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(app_target, level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))?;

    tracing::info!(app = paths.name(), "logging initialized");
    Ok(())
}
