//! Application state, request lifecycle and event handling.

use crate::client::{WeatherClient, WeatherError, WeatherResult};
use crate::config::Config;
use crate::models::{Report, Units};
use crate::render::{render, WeatherView};
use crossterm::event::{Event, KeyCode, KeyModifiers};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tui_keybinds::{dispatch, ClickMap, KeyBinding, Keymap, WidgetInput};
use tui_theme::{FlagEncoding, FlagStore, ThemeMode, ThemeToggle};

/// Stored as `"dark"`/`"light"`, dark unless set.
pub const THEME_FLAG: FlagEncoding = FlagEncoding {
    key: "weatherTheme",
    dark: "dark",
    light: "light",
    default: ThemeMode::Dark,
};

const MAX_CITY_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    City,
    Units,
    Search,
    Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    ToggleUnits,
    ToggleTheme,
    Help,
    Quit,
}

/// What the result area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Empty,
    Loading,
    Report(WeatherView),
    Error(String),
}

/// Outcome of request `id`.
#[derive(Debug)]
pub struct Completion {
    pub id: u64,
    pub result: WeatherResult<Report>,
}

/// Sends exactly one [`Completion`] per request. If the task is dropped
/// before finishing, the completion is `Cancelled`.
struct CompletionGuard {
    id: u64,
    tx: Option<UnboundedSender<Completion>>,
}

impl CompletionGuard {
    fn finish(mut self, result: WeatherResult<Report>) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Completion { id: self.id, result });
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Completion {
                id: self.id,
                result: Err(WeatherError::Cancelled),
            });
        }
    }
}

pub struct App {
    pub city: String,
    pub units: Units,
    pub panel: Panel,
    /// A request is in flight; the search control is disabled
    pub loading: bool,
    /// Id of the latest request. Completions for other ids are stale.
    pub request_id: u64,
    client: WeatherClient,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    task: Option<JoinHandle<()>>,
    pub theme: ThemeToggle,
    pub keymap: Keymap<Action>,
    pub clicks: ClickMap<Target>,
    pub notice: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, client: WeatherClient, store: Box<dyn FlagStore>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            city: config.defaults.city.clone(),
            units: config.defaults.units,
            panel: Panel::Empty,
            loading: false,
            request_id: 0,
            client,
            tx,
            rx,
            task: None,
            theme: ThemeToggle::load(store, THEME_FLAG),
            keymap: build_keymap(config),
            clicks: ClickMap::new(),
            notice: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Start a lookup for the current city and units.
    ///
    /// Must be called inside a tokio runtime.
    pub fn submit(&mut self) {
        if self.loading {
            tracing::debug!(id = self.request_id, "search disabled while loading");
            return;
        }
        if let Err(e) = self.client.check(&self.city) {
            self.panel = Panel::Error(e.to_string());
            return;
        }

        self.request_id += 1;
        let id = self.request_id;
        self.loading = true;
        self.panel = Panel::Loading;

        let guard = CompletionGuard {
            id,
            tx: Some(self.tx.clone()),
        };
        let client = self.client.clone();
        let city = self.city.trim().to_string();
        let units = self.units;
        tracing::info!(id, city = %city, %units, "weather request");

        self.task = Some(tokio::spawn(async move {
            let result = client.fetch_current_and_forecast(&city, units).await;
            guard.finish(result);
        }));
    }

    /// Abort the in-flight request, if any. Its completion arrives as `Cancelled`.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Apply finished requests. Returns whether anything changed.
    pub fn poll_completions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.complete(completion);
        }
        changed
    }

    pub fn complete(&mut self, completion: Completion) -> bool {
        if completion.id != self.request_id {
            tracing::debug!(id = completion.id, latest = self.request_id, "discarding stale result");
            return false;
        }

        self.loading = false;
        self.task = None;
        match completion.result {
            Ok(report) => {
                tracing::info!(id = completion.id, city = %report.current.name, days = report.days.len(), "weather loaded");
                self.panel = Panel::Report(render(&report.current, &report.days, report.units));
            }
            Err(e) => {
                tracing::warn!(id = completion.id, error = %e, "weather request failed");
                self.panel = Panel::Error(e.to_string());
            }
        }
        true
    }

    pub fn toggle_units(&mut self) {
        self.units = self.units.toggled();
    }

    pub fn toggle_theme(&mut self) {
        if let Err(e) = self.theme.toggle() {
            tracing::warn!(error = %e, "could not persist theme");
            self.notice = Some(format!("Could not save theme: {}", e));
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        let clicks = std::mem::take(&mut self.clicks);
        dispatch(self, &clicks, event);
        self.clicks = clicks;
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::Submit => self.submit(),
            Action::ToggleUnits => self.toggle_units(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::Help => self.show_help = true,
            Action::Quit => self.should_quit = true,
        }
    }
}

impl WidgetInput for App {
    type Target = Target;

    fn on_key(&mut self, key: &KeyBinding) -> bool {
        if key.is_ctrl('c') {
            self.should_quit = true;
            return true;
        }
        if self.show_help {
            self.show_help = false;
            return true;
        }
        self.notice = None;

        if let Some(action) = self.keymap.get(key) {
            self.run_action(action);
            return true;
        }

        match key.key {
            KeyCode::Backspace => {
                self.city.pop();
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                if self.city.chars().count() < MAX_CITY_LEN {
                    self.city.push(c);
                }
            }
            _ => return false,
        }
        true
    }

    fn on_click(&mut self, target: Target) -> bool {
        if self.show_help {
            self.show_help = false;
            return true;
        }
        self.notice = None;

        match target {
            Target::City => {}
            Target::Units => self.toggle_units(),
            Target::Search => self.submit(),
            Target::Theme => self.toggle_theme(),
        }
        true
    }
}

fn build_keymap(config: &Config) -> Keymap<Action> {
    let mut keymap = Keymap::new();
    let keys = &config.keys;
    for (notation, fallback, action) in [
        (&keys.submit, "enter", Action::Submit),
        (&keys.toggle_units, "ctrl+u", Action::ToggleUnits),
        (&keys.toggle_theme, "ctrl+t", Action::ToggleTheme),
        (&keys.help, "f1", Action::Help),
        (&keys.quit, "esc", Action::Quit),
    ] {
        if let Err(e) = keymap.bind_str(notation, action) {
            tracing::warn!(key = %notation, error = %e, "invalid key binding, using default");
            let _ = keymap.bind_str(fallback, action);
        }
    }
    keymap
}
