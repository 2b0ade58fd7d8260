//! Configuration for the stopwatch.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tui_theme::ThemeMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub theme: ThemeMode,
    /// Display refresh period while running
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub keys: KeyConfig,
}

fn default_log_level() -> String { "info".to_string() }
fn default_tick_interval_ms() -> u64 { 10 }

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            theme: ThemeMode::default(),
            tick_interval_ms: default_tick_interval_ms(),
            keys: KeyConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> tui_shell::ShellResult<Self> {
        tui_shell::load_toml(path)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        tui_shell::save_toml(path, self)?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Extra bindings on top of the fixed `space`/`s`/`r` controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default = "default_start_stop")]
    pub start_stop: String,
    #[serde(default = "default_reset")]
    pub reset: String,
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_help")]
    pub help: String,
}

fn default_start_stop() -> String { "enter".to_string() }
fn default_reset() -> String { "backspace".to_string() }
fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            start_stop: default_start_stop(),
            reset: default_reset(),
            quit: default_quit(),
            help: default_help(),
        }
    }
}
