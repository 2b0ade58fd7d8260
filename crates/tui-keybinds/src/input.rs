//! The click/key input interface.

use crate::binding::KeyBinding;
use crate::click::ClickMap;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};

/// Input surface of a widget core.
///
/// Cores receive already-resolved input: a normalized key, or the target a
/// click landed on. They never see terminal events directly.
pub trait WidgetInput {
    /// What a click can land on (a button, a keypad key, a day cell).
    type Target: Copy;

    /// Handle a key press. Returns whether the key was consumed.
    fn on_key(&mut self, key: &KeyBinding) -> bool;

    /// Handle a click on a target. Returns whether it was consumed.
    fn on_click(&mut self, target: Self::Target) -> bool;
}

/// Route one terminal event to a widget.
///
/// Key presses go to [`WidgetInput::on_key`]; left-button presses are
/// hit-tested against `clicks` and go to [`WidgetInput::on_click`]. Everything
/// else (releases, repeats, drags, resizes) is ignored.
pub fn dispatch<W: WidgetInput>(widget: &mut W, clicks: &ClickMap<W::Target>, event: &Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => widget.on_key(&KeyBinding::from_event(key)),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            match clicks.hit(mouse.column, mouse.row) {
                Some(target) => widget.on_click(target),
                None => {
                    tracing::trace!(column = mouse.column, row = mouse.row, "click outside targets");
                    false
                }
            }
        }
        _ => false,
    }
}
