//! Shared runtime pieces for the desk widgets.
//!
//! Every widget binary does the same things around its own core: find its
//! config and data directories, read `config.toml`, open a log file, take
//! over the terminal and give it back on exit. This crate holds those steps.

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod terminal;

// Re-exports from shared crates
pub use tui_keybinds;
pub use tui_theme;

pub use config::{load_toml, save_toml};
pub use error::{ShellError, ShellResult};
pub use logging::init_logging;
pub use paths::AppPaths;
pub use terminal::{TerminalGuard, Tui};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rectangle centered in `r`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
