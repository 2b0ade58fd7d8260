//! # tui-keybinds
//!
//! Input plumbing for the desk widgets.
//!
//! ## Features
//!
//! - [`KeyBinding`] values and a config-friendly notation parser
//! - [`Keymap`] from bindings to app actions, with string overrides
//! - [`ClickMap`] hit regions recorded while drawing
//! - The [`WidgetInput`] trait (`on_key` / `on_click`) and [`dispatch`],
//!   the adapter from raw crossterm events to those two calls

mod binding;
mod click;
mod input;
mod keymap;
mod parser;

pub use binding::KeyBinding;
pub use click::ClickMap;
pub use input::{dispatch, WidgetInput};
pub use keymap::Keymap;
pub use parser::{parse_key, KeyParseError};

use crossterm::event::{KeyCode, KeyModifiers};

/// Helper to create a key binding without modifiers.
pub fn key(code: KeyCode) -> KeyBinding {
    KeyBinding {
        key: code,
        modifiers: KeyModifiers::NONE,
    }
}

/// Helper to create a Ctrl+key binding.
pub fn ctrl(c: char) -> KeyBinding {
    KeyBinding {
        key: KeyCode::Char(c.to_ascii_lowercase()),
        modifiers: KeyModifiers::CONTROL,
    }
}

/// Helper to create a plain character binding.
pub fn plain(c: char) -> KeyBinding {
    key(KeyCode::Char(c))
}
