//! Persisted dark/light toggle.

use crate::mode::ThemeMode;
use crate::palette::Palette;
use crate::store::{FlagStore, StoreResult};

/// How a widget spells its theme flag in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagEncoding {
    pub key: &'static str,
    /// Stored value meaning dark mode
    pub dark: &'static str,
    /// Stored value meaning light mode
    pub light: &'static str,
    /// Mode used when the flag is absent or unrecognized
    pub default: ThemeMode,
}

impl FlagEncoding {
    pub fn decode(&self, value: Option<&str>) -> ThemeMode {
        match value {
            Some(v) if v == self.dark => ThemeMode::Dark,
            Some(v) if v == self.light => ThemeMode::Light,
            Some(v) => {
                tracing::warn!(key = self.key, value = v, "unrecognized theme flag, using default");
                self.default
            }
            None => self.default,
        }
    }

    pub fn encode(&self, mode: ThemeMode) -> &'static str {
        match mode {
            ThemeMode::Dark => self.dark,
            ThemeMode::Light => self.light,
        }
    }
}

/// The active theme mode of a widget, bound to its flag store.
pub struct ThemeToggle {
    store: Box<dyn FlagStore>,
    encoding: FlagEncoding,
    mode: ThemeMode,
}

impl ThemeToggle {
    /// Read the current mode from `store`.
    pub fn load(store: Box<dyn FlagStore>, encoding: FlagEncoding) -> Self {
        let mode = encoding.decode(store.get(encoding.key).as_deref());
        Self {
            store,
            encoding,
            mode,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn palette(&self) -> Palette {
        self.mode.palette()
    }

    /// Flip the mode and persist it.
    ///
    /// The in-memory mode flips even if the write fails, so the screen
    /// always reflects the last click.
    pub fn toggle(&mut self) -> StoreResult<ThemeMode> {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = %self.mode, "theme toggled");
        self.store
            .set(self.encoding.key, self.encoding.encode(self.mode))?;
        Ok(self.mode)
    }

    /// Raw stored value of the flag.
    pub fn stored_value(&self) -> Option<String> {
        self.store.get(self.encoding.key)
    }
}
