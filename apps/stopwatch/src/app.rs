//! Application state and event handling.

use crate::clock::Clock;
use crate::config::Config;
use crate::stopwatch::{Control, Stopwatch};
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use tui_keybinds::{dispatch, plain, ClickMap, KeyBinding, Keymap};
use tui_theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartStop,
    Reset,
    Help,
    Quit,
}

pub struct App {
    pub stopwatch: Stopwatch,
    pub clicks: ClickMap<Control>,
    pub keymap: Keymap<Action>,
    pub palette: Palette,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, clock: Box<dyn Clock>) -> Self {
        Self {
            stopwatch: Stopwatch::new(clock, config.tick_interval()),
            clicks: ClickMap::new(),
            keymap: build_keymap(config),
            palette: config.theme.palette(),
            show_help: false,
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
                    Some(Action::StartStop) => self.stopwatch.toggle(),
                    Some(Action::Reset) if self.stopwatch.can_reset() => self.stopwatch.reset(),
                    Some(Action::Reset) => {}
                    Some(Action::Help) => self.show_help = true,
                    Some(Action::Quit) => self.should_quit = true,
                    None => {
                        dispatch(&mut self.stopwatch, &self.clicks, event);
                    }
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if self.show_help {
                    self.show_help = false;
                    return;
                }
                dispatch(&mut self.stopwatch, &self.clicks, event);
            }
            _ => {}
        }
    }
}

fn build_keymap(config: &Config) -> Keymap<Action> {
    let mut keymap = Keymap::new()
        .with(plain('q'), Action::Quit)
        .with(plain('?'), Action::Help);
    let keys = &config.keys;
    for (notation, action) in [
        (&keys.start_stop, Action::StartStop),
        (&keys.reset, Action::Reset),
        (&keys.quit, Action::Quit),
        (&keys.help, Action::Help),
    ] {
        if let Err(e) = keymap.rebind_str(notation, action) {
            tracing::warn!(key = %notation, error = %e, "ignoring invalid key binding");
        }
    }
    keymap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crossterm::event::KeyCode;
    use std::time::Duration;
    use tui_testing::InputSequence;

    fn app() -> (App, ManualClock) {
        let clock = ManualClock::new();
        (App::new(&Config::default(), Box::new(clock.clone())), clock)
    }

    fn feed(app: &mut App, seq: &InputSequence) {
        for event in seq.events() {
            app.handle_event(event);
        }
    }

    #[test]
    fn test_space_starts_and_stops() {
        let (mut app, clock) = app();
        feed(&mut app, InputSequence::new().char(' '));
        assert!(app.stopwatch.is_running());
        clock.advance(Duration::from_millis(1_500));
        feed(&mut app, InputSequence::new().char('s'));
        assert!(!app.stopwatch.is_running());
        assert_eq!(app.stopwatch.display(), "00:00:01.50");
    }

    #[test]
    fn test_configured_keys() {
        let (mut app, clock) = app();
        feed(&mut app, InputSequence::new().enter());
        clock.advance(Duration::from_millis(20));
        feed(&mut app, InputSequence::new().enter().key(KeyCode::Backspace));
        assert_eq!(app.stopwatch.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_reset_key_ignored_while_running() {
        let (mut app, clock) = app();
        feed(&mut app, InputSequence::new().enter());
        clock.advance(Duration::from_millis(30));
        feed(&mut app, InputSequence::new().key(KeyCode::Backspace).char('r'));
        assert!(app.stopwatch.is_running());
        app.stopwatch.tick();
        assert_eq!(app.stopwatch.elapsed(), Duration::from_millis(30));
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (mut app, _) = app();
        feed(&mut app, InputSequence::new().char('?').char(' '));
        assert!(!app.show_help);
        assert!(!app.stopwatch.is_running());
    }

    #[test]
    fn test_quit() {
        let (mut app, _) = app();
        feed(&mut app, InputSequence::new().ctrl('c'));
        assert!(app.should_quit);
    }
}
