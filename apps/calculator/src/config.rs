//! Configuration for the calculator.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tui_theme::ThemeMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default)]
    pub keys: KeyConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            theme: ThemeMode::default(),
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
}

/// App-level keys. Calculator keys themselves are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_help")]
    pub help: String,
}

fn default_quit() -> String { "q".to_string() }
fn default_help() -> String { "?".to_string() }

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
        }
    }
}
