//! Configuration for the weather widget.

use crate::models::Units;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable consulted when the config has no key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub keys: KeyConfig,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            defaults: Defaults::default(),
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

    /// The configured key, else the environment's.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(self.api.api_key.as_deref(), std::env::var(API_KEY_ENV).ok().as_deref())
    }
}

fn resolve_api_key(configured: Option<&str>, env: Option<&str>) -> Option<String> {
    [configured, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bound on the combined current + forecast fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "https://api.openweathermap.org".to_string() }
fn default_timeout_secs() -> u64 { 10 }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Pre-filled city
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub units: Units,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default = "default_submit")]
    pub submit: String,
    #[serde(default = "default_toggle_units")]
    pub toggle_units: String,
    #[serde(default = "default_toggle_theme")]
    pub toggle_theme: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_quit")]
    pub quit: String,
}

fn default_submit() -> String { "enter".to_string() }
fn default_toggle_units() -> String { "ctrl+u".to_string() }
fn default_toggle_theme() -> String { "ctrl+t".to_string() }
fn default_help() -> String { "f1".to_string() }
fn default_quit() -> String { "esc".to_string() }

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            submit: default_submit(),
            toggle_units: default_toggle_units(),
            toggle_theme: default_toggle_theme(),
            help: default_help(),
            quit: default_quit(),
        }
    }
}
