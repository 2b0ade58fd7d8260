//! Application state and event handling.

use crate::config::Config;
use crate::engine::{Calculator, KeypadKey};
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use tui_keybinds::{dispatch, plain, ClickMap, KeyBinding, Keymap};
use tui_theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
}

pub struct App {
    pub calc: Calculator,
    pub clicks: ClickMap<KeypadKey>,
    pub keymap: Keymap<Action>,
    pub palette: Palette,
    pub show_help: bool,
    /// Key most recently pressed or clicked, drawn highlighted
    pub last_pressed: Option<KeypadKey>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            calc: Calculator::new(),
            clicks: ClickMap::new(),
            keymap: build_keymap(config),
            palette: config.theme.palette(),
            show_help: false,
            last_pressed: None,
            should_quit: false,
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let binding = KeyBinding::from_event(key);
                if binding.is_ctrl('c') {
                    self.should_quit = true;
                    return;
                }
                if self.show_help {
                    self.show_help = false;
                    return;
                }
                match self.keymap.get(&binding) {
                    Some(Action::Quit) => {
                        self.should_quit = true;
                        return;
                    }
                    Some(Action::Help) => {
                        self.show_help = true;
                        return;
                    }
                    None => {}
                }
                self.last_pressed = keypad_equivalent(&binding);
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if self.show_help {
                    self.show_help = false;
                    return;
                }
                self.last_pressed = self.clicks.hit(mouse.column, mouse.row);
            }
            _ => {}
        }

        dispatch(&mut self.calc, &self.clicks, event);
    }
}

fn build_keymap(config: &Config) -> Keymap<Action> {
    let mut keymap = Keymap::new()
        .with(plain('q'), Action::Quit)
        .with(plain('?'), Action::Help);
    for (notation, action) in [(&config.keys.quit, Action::Quit), (&config.keys.help, Action::Help)] {
        if let Err(e) = keymap.rebind_str(notation, action) {
            tracing::warn!(key = %notation, error = %e, "ignoring invalid key binding");
        }
    }
    keymap
}

/// The keypad key a keyboard key stands for.
fn keypad_equivalent(binding: &KeyBinding) -> Option<KeypadKey> {
    match binding.key {
        KeyCode::Enter => Some(KeypadKey::Equals),
        KeyCode::Backspace => Some(KeypadKey::Delete),
        KeyCode::Esc => Some(KeypadKey::Clear),
        KeyCode::Char(c) => KeypadKey::ROWS
            .iter()
            .flatten()
            .copied()
            .find(|k| *k == KeypadKey::Char(c)),
        _ => None,
    }
}
