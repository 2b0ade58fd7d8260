#![allow(dead_code)]
//! Work Calendar - Russian production calendar with holidays and work-day stats.

mod app;
mod calendar;
mod config;
mod grid;
mod search;
mod ui;

use app::App;
use config::Config;
use crossterm::event;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tui_shell::{AppPaths, TerminalGuard};

const APP_NAME: &str = "work-calendar";

fn main() -> anyhow::Result<()> {
    let paths = AppPaths::new(APP_NAME)?;
    let config_path = paths.config_file();
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Err(e) = tui_shell::init_logging(&paths, "work_calendar", &config.general.log_level) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    if let Some(e) = config_error {
        tracing::warn!(path = %config_path.display(), error = %e, "invalid config, using defaults");
    }
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            tracing::warn!(error = %e, "could not write default config");
        }
    }

    let today = chrono::Local::now().date_naive();
    let mut app = App::new(config, paths.flag_store(), today);
    tracing::info!(year = app.year, theme = %app.theme.mode(), "work calendar started");

    let mut guard = TerminalGuard::enter()?;
    let result = run_app(guard.terminal(), &mut app);
    drop(guard);

    if let Err(err) = &result {
        tracing::error!(error = %err, "work calendar exited with error");
    }
    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(500))? {
            let event = event::read()?;
            app.handle_event(&event);
            if app.should_quit {
                break;
            }
        }

        // Keep the today marker right across midnight
        let today = chrono::Local::now().date_naive();
        if today != app.today {
            app.today = today;
        }
    }
    Ok(())
}
