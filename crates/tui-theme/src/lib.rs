//! # tui-theme
//!
//! Theming for the desk widgets.
//!
//! ## Features
//!
//! - Two-mode (dark/light) semantic palettes
//! - A small key/value flag store, the terminal counterpart of browser local storage
//! - A [`ThemeToggle`] that reads and writes the active mode through that store
//!   using a per-widget key and value encoding

mod mode;
mod palette;
mod store;
mod toggle;

pub use mode::ThemeMode;
pub use palette::Palette;
pub use store::{FileFlagStore, FlagStore, MemoryFlagStore, StoreError, StoreResult};
pub use toggle::{FlagEncoding, ThemeToggle};

/// File name of the flag store inside an app's data directory.
pub const STORAGE_FILE: &str = "storage.toml";
