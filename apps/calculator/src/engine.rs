//! Calculator state machine.

use crate::parser::{self, EvalError};
use crossterm::event::KeyCode;
use tui_keybinds::{KeyBinding, WidgetInput};

/// Text shown after a failed evaluation.
pub const ERROR_TEXT: &str = "Error";

/// Results are rounded to this many decimal places.
const PRECISION: f64 = 1e10;

/// Results at or beyond this magnitude are left as they are.
const ROUNDING_LIMIT: f64 = 1e15;

/// A key on the on-screen keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadKey {
    Clear,
    Delete,
    Equals,
    Char(char),
}

impl KeypadKey {
    /// Keypad layout, row by row.
    pub const ROWS: [[KeypadKey; 4]; 5] = [
        [Self::Clear, Self::Delete, Self::Char('('), Self::Char(')')],
        [Self::Char('7'), Self::Char('8'), Self::Char('9'), Self::Char('/')],
        [Self::Char('4'), Self::Char('5'), Self::Char('6'), Self::Char('*')],
        [Self::Char('1'), Self::Char('2'), Self::Char('3'), Self::Char('-')],
        [Self::Char('0'), Self::Char('.'), Self::Equals, Self::Char('+')],
    ];

    /// Parse a key identifier: `C`, `DEL`, `=` or a single literal character.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "C" => Some(Self::Clear),
            "DEL" => Some(Self::Delete),
            "=" => Some(Self::Equals),
            _ => {
                let mut chars = id.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Clear => "C".to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Equals => "=".to_string(),
            Self::Char(c) => c.to_string(),
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Char('+' | '-' | '*' | '/'))
    }
}

/// Expression buffer plus what the display shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    expression: String,
    display: String,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_TEXT && self.expression.is_empty()
    }

    /// Append a character. Nothing is validated until evaluation.
    pub fn append(&mut self, c: char) {
        self.expression.push(c);
        self.display = self.expression.clone();
    }

    pub fn delete_last_char(&mut self) {
        self.expression.pop();
        self.display = self.expression.clone();
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.display.clear();
    }

    /// Evaluate the buffer. On success the result replaces the buffer, so the
    /// next keys continue from it.
    pub fn evaluate(&mut self) {
        if self.expression.is_empty() {
            return;
        }

        match parser::evaluate(&self.expression) {
            Ok(value) => {
                let result = format_result(round_result(value));
                tracing::debug!(expression = %self.expression, %result, "evaluated");
                self.display = result.clone();
                self.expression = result;
            }
            Err(e) => self.handle_error(&e),
        }
    }

    /// Show the error state and drop the buffer.
    pub fn handle_error(&mut self, error: &EvalError) {
        tracing::debug!(expression = %self.expression, %error, "evaluation failed");
        self.display = ERROR_TEXT.to_string();
        self.expression.clear();
    }

    /// Apply a keypad key.
    pub fn process_key(&mut self, key: KeypadKey) {
        match key {
            KeypadKey::Clear => self.clear(),
            KeypadKey::Delete => self.delete_last_char(),
            KeypadKey::Equals => self.evaluate(),
            KeypadKey::Char(c) => self.append(c),
        }
    }
}

impl WidgetInput for Calculator {
    type Target = KeypadKey;

    fn on_key(&mut self, key: &KeyBinding) -> bool {
        if !key.modifiers.is_empty() {
            return false;
        }
        match key.key {
            KeyCode::Enter => self.evaluate(),
            KeyCode::Backspace => self.delete_last_char(),
            KeyCode::Esc => self.clear(),
            KeyCode::Char(c) if c.is_ascii_digit() || "+-*/.()".contains(c) => self.append(c),
            _ => return false,
        }
        true
    }

    fn on_click(&mut self, target: KeypadKey) -> bool {
        self.process_key(target);
        true
    }
}

/// Round half up to ten decimal places.
pub fn round_result(value: f64) -> f64 {
    if !(value.abs() < ROUNDING_LIMIT) {
        return value;
    }
    let scaled = (value + f64::EPSILON) * PRECISION;
    (scaled + 0.5).floor() / PRECISION
}

/// Shortest decimal form, never in exponent notation, `-0` shown as `0`.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_keypad_layout() {
        let rows: Vec<String> = KeypadKey::ROWS
            .iter()
            .map(|row| row.iter().map(|k| k.label()).collect::<Vec<_>>().join(" "))
            .collect();
        insta::assert_snapshot!(rows.join("\n"), @r"
        C DEL ( )
        7 8 9 /
        4 5 6 *
        1 2 3 -
        0 . = +
        ");
    }

    fn run(keys: &str) -> Calculator {
        let mut calc = Calculator::new();
        for c in keys.chars() {
            calc.append(c);
        }
        calc.evaluate();
        calc
    }

    #[test]
    fn test_simple_sum() {
        let calc = run("2+2");
        assert_eq!(calc.display(), "4");
        assert_eq!(calc.expression(), "4");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(run("1/3").display(), "0.3333333333");
        assert_eq!(run("0.1+0.2").display(), "0.3");
        assert_eq!(run("2/3").display(), "0.6666666667");
        assert_eq!(run("-1/3").display(), "-0.3333333333");
        assert_eq!(run("654321.123456789012").display(), "654321.1234567892");
    }

    #[test]
    fn test_invalid_input_errors_and_clears() {
        let calc = run("2+alert(1)");
        assert_eq!(calc.display(), ERROR_TEXT);
        assert_eq!(calc.expression(), "");
        assert!(calc.is_error());
    }

    #[test]
    fn test_deeply_nested_input_errors() {
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let minus = format!("{}1", "-".repeat(100_000));
        for expr in [parens, minus] {
            let calc = run(&expr);
            assert!(calc.is_error());
            assert_eq!(calc.display(), ERROR_TEXT);
            assert_eq!(calc.expression(), "");
        }
    }

    #[test]
    fn test_whitelisted_but_malformed_errors() {
        for expr in ["2..3", "()", "2+", "1/0", "2(3)"] {
            let calc = run(expr);
            assert!(calc.is_error(), "{} should fail", expr);
        }
    }

    #[test]
    fn test_chained_calculation() {
        let mut calc = run("2+2");
        calc.append('+');
        calc.append('1');
        assert_eq!(calc.display(), "4+1");
        calc.evaluate();
        assert_eq!(calc.display(), "5");
    }

    #[test]
    fn test_typing_after_error_starts_fresh() {
        let mut calc = run("*");
        assert!(calc.is_error());
        calc.append('7');
        assert_eq!(calc.display(), "7");
        assert_eq!(calc.expression(), "7");
    }

    #[test]
    fn test_evaluate_empty_is_noop() {
        let mut calc = Calculator::new();
        calc.evaluate();
        assert_eq!(calc, Calculator::new());
    }

    #[test]
    fn test_delete_and_clear() {
        let mut calc = Calculator::new();
        calc.delete_last_char();
        assert_eq!(calc.display(), "");

        calc.append('1');
        calc.append('2');
        calc.delete_last_char();
        assert_eq!(calc.display(), "1");

        calc.clear();
        assert_eq!(calc.display(), "");
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_negative_zero_and_large_values() {
        assert_eq!(run("-0").display(), "0");
        assert_eq!(run("0*-1").display(), "0");
        assert_eq!(run("1000000*1000000*1000000").display(), "1000000000000000000");
    }

    #[test]
    fn test_keypad_ids() {
        assert_eq!(KeypadKey::from_id("C"), Some(KeypadKey::Clear));
        assert_eq!(KeypadKey::from_id("DEL"), Some(KeypadKey::Delete));
        assert_eq!(KeypadKey::from_id("="), Some(KeypadKey::Equals));
        assert_eq!(KeypadKey::from_id("7"), Some(KeypadKey::Char('7')));
        assert_eq!(KeypadKey::from_id("77"), None);
        assert_eq!(KeypadKey::from_id(""), None);
    }

    #[test]
    fn test_process_key() {
        let mut calc = Calculator::new();
        for id in ["1", "2", "DEL", "+", "3", "="] {
            calc.process_key(KeypadKey::from_id(id).unwrap());
        }
        assert_eq!(calc.display(), "4");
        calc.process_key(KeypadKey::Clear);
        assert_eq!(calc.display(), "");
    }

    #[test]
    fn test_keyboard() {
        let mut calc = Calculator::new();
        let press = |calc: &mut Calculator, code: KeyCode| {
            calc.on_key(&KeyBinding::new(code, KeyModifiers::NONE))
        };

        assert!(press(&mut calc, KeyCode::Char('9')));
        assert!(press(&mut calc, KeyCode::Char('*')));
        assert!(press(&mut calc, KeyCode::Char('2')));
        assert!(!press(&mut calc, KeyCode::Char('x')));
        assert_eq!(calc.display(), "9*2");
        assert!(press(&mut calc, KeyCode::Enter));
        assert_eq!(calc.display(), "18");
        assert!(press(&mut calc, KeyCode::Backspace));
        assert_eq!(calc.display(), "1");
        assert!(press(&mut calc, KeyCode::Esc));
        assert_eq!(calc.display(), "");
    }

    #[test]
    fn test_click_equals_keyboard() {
        let mut clicked = Calculator::new();
        let mut typed = Calculator::new();
        for key in [KeypadKey::Char('6'), KeypadKey::Char('/'), KeypadKey::Char('4'), KeypadKey::Equals] {
            clicked.on_click(key);
        }
        for code in [KeyCode::Char('6'), KeyCode::Char('/'), KeyCode::Char('4'), KeyCode::Enter] {
            typed.on_key(&KeyBinding::new(code, KeyModifiers::NONE));
        }
        assert_eq!(clicked, typed);
        assert_eq!(clicked.display(), "1.5");
    }

    #[test]
    fn test_round_result() {
        assert_eq!(round_result(0.5), 0.5);
        assert_eq!(round_result(1.0 / 3.0), 0.3333333333);
        assert_eq!(round_result(1e300), 1e300);
    }
}
