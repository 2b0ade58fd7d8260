#![allow(dead_code)]
//! Weather - current conditions and a 5-day forecast from OpenWeather.

mod app;
mod client;
mod config;
#[cfg(test)]
mod fixtures;
mod forecast;
mod models;
mod render;
mod ui;

use app::App;
use client::WeatherClient;
use config::Config;
use crossterm::event;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tui_shell::{AppPaths, TerminalGuard};

const APP_NAME: &str = "weather";
/// Pause between UI iterations, during which the fetch task runs.
const FRAME: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let paths = AppPaths::new(APP_NAME)?;
    let config_path = paths.config_file();
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if let Err(e) = tui_shell::init_logging(&paths, "weather", &config.log_level) {
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

    let api_key = config.api_key();
    if api_key.is_none() {
        tracing::warn!("no API key configured");
    }
    let client = WeatherClient::new(&config.api.base_url, api_key, config.api.timeout())?;
    let mut app = App::new(&config, client, paths.flag_store());

    let mut guard = TerminalGuard::enter()?;
    let result = run_app(guard.terminal(), &mut app).await;
    drop(guard);
    app.cancel();

    if let Err(err) = &result {
        tracing::error!(error = %err, "weather exited with error");
    }
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut dirty = true;
    loop {
        if app.poll_completions() {
            dirty = true;
        }
        if dirty {
            terminal.draw(|f| ui::draw(f, app))?;
            dirty = false;
        }

        if event::poll(Duration::ZERO)? {
            let event = event::read()?;
            app.handle_event(&event);
            if app.should_quit {
                break;
            }
            dirty = true;
            continue;
        }

        tokio::time::sleep(FRAME).await;
    }
    Ok(())
}
