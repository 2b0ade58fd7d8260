#![allow(dead_code)]
//! Stopwatch - centisecond stopwatch with start/stop and reset.

mod app;
mod clock;
mod config;
mod stopwatch;
mod ticker;
mod ui;

use app::App;
use clock::SystemClock;
use config::Config;
use crossterm::event;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tui_shell::{AppPaths, TerminalGuard};

const APP_NAME: &str = "stopwatch";
/// Input wait while the stopwatch is stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    let paths = AppPaths::new(APP_NAME)?;
    let config_path = paths.config_file();
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Err(e) = tui_shell::init_logging(&paths, "stopwatch", &config.log_level) {
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

    let mut app = App::new(&config, Box::new(SystemClock));
    let mut guard = TerminalGuard::enter()?;
    let result = run_app(guard.terminal(), &mut app);
    drop(guard);

    if let Err(err) = &result {
        tracing::error!(error = %err, "stopwatch exited with error");
    }
    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|f| ui::draw(f, app))?;
            dirty = false;
        }

        if event::poll(app.stopwatch.timeout(IDLE_POLL))? {
            let event = event::read()?;
            app.handle_event(&event);
            if app.should_quit {
                break;
            }
            dirty = true;
        }

        if app.stopwatch.tick() {
            dirty = true;
        }
    }
    Ok(())
}
