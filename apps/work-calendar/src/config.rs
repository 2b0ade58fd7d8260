//! Configuration for the work calendar.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub keys: KeyConfig,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Year shown at startup, defaults to the current year
    #[serde(default)]
    pub start_year: Option<i32>,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            start_year: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_true")]
    pub show_stats: bool,
}

fn default_true() -> bool { true }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_stats: true,
        }
    }
}

/// Key notation strings, parsed with `tui_keybinds::parse_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default = "default_prev_year")]
    pub prev_year: String,
    #[serde(default = "default_next_year")]
    pub next_year: String,
    #[serde(default = "default_toggle_theme")]
    pub toggle_theme: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_clear_search")]
    pub clear_search: String,
}

fn default_prev_year() -> String { "left".to_string() }
fn default_next_year() -> String { "right".to_string() }
fn default_toggle_theme() -> String { "t".to_string() }
fn default_search() -> String { "/".to_string() }
fn default_clear_search() -> String { "c".to_string() }

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            prev_year: default_prev_year(),
            next_year: default_next_year(),
            toggle_theme: default_toggle_theme(),
            search: default_search(),
            clear_search: default_clear_search(),
        }
    }
}
