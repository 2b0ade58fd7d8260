//! TOML config helpers.

use crate::error::ShellResult;
#[cfg(test)]
use crate::error::ShellError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read a TOML file into `T`.
///
/// A missing file gives `T::default()`. An unreadable or invalid file is an
/// error, so the caller can report it once logging is up.
pub fn load_toml<T>(path: &Path) -> ShellResult<T>
where
    T: DeserializeOwned + Default,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    Ok(toml::from_str(&content)?)
}

/// Write `value` as pretty TOML, creating parent directories.
pub fn save_toml<T: Serialize>(path: &Path, value: &T) -> ShellResult<()> {
    let content = toml::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
