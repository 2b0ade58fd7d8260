//! Key notation parser.

use crate::binding::KeyBinding;
use crossterm::event::{KeyCode, KeyModifiers};
use thiserror::Error;

/// Error parsing a key notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// Parse a key notation string into a KeyBinding.
///
/// Supported formats:
/// - `"ctrl+t"`, `"C-t"`, `"<C-t>"` - Ctrl+T
/// - `"alt+x"`, `"M-x"` - Alt+X
/// - `"enter"`, `"esc"`, `"tab"`, `"space"`, `"backspace"` - special keys
/// - `"up"`, `"down"`, `"left"`, `"right"` - arrows
/// - `"f1"` through `"f12"`
/// - any single character, including `"+"` and `"-"`
pub fn parse_key(s: &str) -> Result<KeyBinding, KeyParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let s = s.strip_prefix('<').and_then(|s| s.strip_suffix('>')).unwrap_or(s);

    // Lone operator characters are keys, not separators
    if s.chars().count() == 1 {
        return single_char(s).map(|key| KeyBinding::new(key, KeyModifiers::NONE));
    }

    let mut parts: Vec<&str> = if s.contains('+') {
        s.split('+').collect()
    } else if s.contains('-') && s.len() > 2 {
        s.split('-').collect()
    } else {
        vec![s]
    };

    let last = parts.pop().unwrap_or_default();
    let mut modifiers = KeyModifiers::NONE;
    for modifier in parts {
        match modifier.to_lowercase().as_str() {
            "ctrl" | "control" | "c" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "a" | "m" => modifiers |= KeyModifiers::ALT,
            "shift" | "s" => modifiers |= KeyModifiers::SHIFT,
            other => return Err(KeyParseError::UnknownModifier(other.to_string())),
        }
    }

    let key_str = last.to_lowercase();
    let key = match key_str.as_str() {
        "enter" | "return" | "cr" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        f if f.starts_with('f') && f.len() > 1 => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(KeyParseError::UnknownKey(key_str)),
        },
        _ if last.chars().count() == 1 => single_char(last)?,
        _ => return Err(KeyParseError::UnknownKey(key_str)),
    };

    Ok(KeyBinding { key, modifiers })
}

fn single_char(s: &str) -> Result<KeyCode, KeyParseError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(KeyCode::Char(c.to_ascii_lowercase())),
        _ => Err(KeyParseError::UnknownKey(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let key = parse_key("r").unwrap();
        assert_eq!(key.key, KeyCode::Char('r'));
        assert_eq!(key.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_parse_operators() {
        assert_eq!(parse_key("+").unwrap().key, KeyCode::Char('+'));
        assert_eq!(parse_key("-").unwrap().key, KeyCode::Char('-'));
        assert_eq!(parse_key("/").unwrap().key, KeyCode::Char('/'));
    }

    #[test]
    fn test_parse_ctrl() {
        for notation in ["ctrl+t", "C-t", "<C-t>", "Ctrl+T"] {
            let key = parse_key(notation).unwrap();
            assert_eq!(key.key, KeyCode::Char('t'), "{}", notation);
            assert!(key.modifiers.contains(KeyModifiers::CONTROL), "{}", notation);
        }
    }

    #[test]
    fn test_parse_special() {
        assert_eq!(parse_key("enter").unwrap().key, KeyCode::Enter);
        assert_eq!(parse_key("esc").unwrap().key, KeyCode::Esc);
        assert_eq!(parse_key("space").unwrap().key, KeyCode::Char(' '));
        assert_eq!(parse_key("left").unwrap().key, KeyCode::Left);
        assert_eq!(parse_key("f12").unwrap().key, KeyCode::F(12));
    }

    #[test]
    fn test_parse_error() {
        assert_eq!(parse_key(""), Err(KeyParseError::Empty));
        assert!(matches!(parse_key("hyper+x"), Err(KeyParseError::UnknownModifier(_))));
        assert!(matches!(parse_key("f13"), Err(KeyParseError::UnknownKey(_))));
        assert!(matches!(parse_key("banana"), Err(KeyParseError::UnknownKey(_))));
    }
}
