//! Shell error types.

use thiserror::Error;

/// Errors from the shared widget runtime.
#[derive(Debug, Error)]
pub enum ShellError {
    /// No home directory to derive config/data paths from.
    #[error("Could not determine a home directory for {0}")]
    NoHomeDir(String),

    /// Logging setup failed.
    #[error("Logging error: {0}")]
    Logging(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML error.
    #[error("TOML error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ShellError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e.to_string())
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type for shell operations.
pub type ShellResult<T> = Result<T, ShellError>;
