//! Per-app directories.

use crate::error::{ShellError, ShellResult};
use std::path::{Path, PathBuf};
use tui_theme::{FileFlagStore, FlagStore, MemoryFlagStore};

/// Where an app keeps its config, flag storage and log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    name: String,
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppPaths {
    /// Platform directories for `app_name`.
    pub fn new(app_name: &str) -> ShellResult<Self> {
        let dirs = directories::ProjectDirs::from("", "", app_name)
            .ok_or_else(|| ShellError::NoHomeDir(app_name.to_string()))?;
        Ok(Self {
            name: app_name.to_string(),
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Both directories under a single root. Used by tests.
    pub fn rooted(root: &Path, app_name: &str) -> Self {
        Self {
            name: app_name.to_string(),
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join(tui_theme::STORAGE_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(format!("{}.log", self.name))
    }

    /// Open the app's flag store, falling back to memory if the file is unusable.
    pub fn flag_store(&self) -> Box<dyn FlagStore> {
        match FileFlagStore::open(self.storage_file()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "flag storage unavailable, settings will not persist");
                Box::new(MemoryFlagStore::new())
            }
        }
    }

    /// Create the config and data directories.
    pub fn ensure_dirs(&self) -> ShellResult<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}
