//! Keymaps from bindings to app actions.

use crate::binding::KeyBinding;
use crate::parser::{parse_key, KeyParseError};
use std::collections::HashMap;

/// Bindings for one app's actions.
#[derive(Debug, Clone)]
pub struct Keymap<A> {
    bindings: HashMap<KeyBinding, A>,
}

impl<A> Default for Keymap<A> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<A: Copy + PartialEq> Keymap<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing whatever the key was bound to.
    pub fn bind(&mut self, key: KeyBinding, action: A) {
        self.bindings.insert(key, action);
    }

    /// Builder form of [`Keymap::bind`].
    pub fn with(mut self, key: KeyBinding, action: A) -> Self {
        self.bind(key, action);
        self
    }

    /// Bind a key written in config notation, e.g. `"ctrl+t"`.
    pub fn bind_str(&mut self, notation: &str, action: A) -> Result<(), KeyParseError> {
        let key = parse_key(notation)?;
        self.bind(key, action);
        Ok(())
    }

    /// Replace every binding of `action` with the key in `notation`.
    ///
    /// On a parse error the existing bindings are kept.
    pub fn rebind_str(&mut self, notation: &str, action: A) -> Result<(), KeyParseError> {
        let key = parse_key(notation)?;
        self.bindings.retain(|_, a| *a != action);
        self.bind(key, action);
        Ok(())
    }

    pub fn get(&self, key: &KeyBinding) -> Option<A> {
        self.bindings.get(key).copied()
    }

    /// Keys bound to an action, for help text. Sorted by display form.
    pub fn keys_for(&self, action: A) -> Vec<KeyBinding> {
        let mut keys: Vec<KeyBinding> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(|k| k.to_string());
        keys
    }

    /// Display form of the first key bound to an action.
    pub fn label(&self, action: A) -> String {
        self.keys_for(action)
            .first()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
