//! Application state and logic.

use crate::calendar::{classify, compute_stats, CalendarDay, YearStats};
use crate::config::Config;
use crate::grid::{render_calendar, MonthGrid};
use crate::search::{Highlight, SearchQuery, MAX_YEAR, MIN_YEAR};
use chrono::{Datelike, NaiveDate};
use crossterm::event::{Event, KeyCode};
use tui_keybinds::{dispatch, key, plain, ClickMap, KeyBinding, Keymap, WidgetInput};
use tui_theme::{FlagEncoding, FlagStore, ThemeMode, ThemeToggle};

/// Stored as `"true"`/`"false"`, light unless set.
pub const THEME_FLAG: FlagEncoding = FlagEncoding {
    key: "darkMode",
    dark: "true",
    light: "false",
    default: ThemeMode::Light,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Year,
    Month,
    Day,
}

impl FormField {
    pub const ALL: [FormField; 3] = [Self::Year, Self::Month, Self::Day];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Month => "Month",
            Self::Day => "Day",
        }
    }

    fn max_len(&self) -> usize {
        match self {
            Self::Year => 4,
            Self::Month | Self::Day => 2,
        }
    }

    fn next(&self) -> Self {
        match self {
            Self::Year => Self::Month,
            Self::Month => Self::Day,
            Self::Day => Self::Year,
        }
    }

    fn prev(&self) -> Self {
        match self {
            Self::Year => Self::Day,
            Self::Month => Self::Year,
            Self::Day => Self::Month,
        }
    }
}

/// Something on screen that reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    PrevYear,
    NextYear,
    ToggleTheme,
    Field(FormField),
    Search,
    ClearSearch,
    Day(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PrevYear,
    NextYear,
    ToggleTheme,
    Search,
    ClearSearch,
    ThisYear,
    ScrollUp,
    ScrollDown,
    Help,
    Quit,
}

/// The year/month/day search inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub year: String,
    pub month: String,
    pub day: String,
    /// Field receiving keystrokes, `None` when the grid has focus
    pub focus: Option<FormField>,
}

impl SearchForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Year => &self.year,
            FormField::Month => &self.month,
            FormField::Day => &self.day,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Year => &mut self.year,
            FormField::Month => &mut self.month,
            FormField::Day => &mut self.day,
        }
    }
}

pub struct App {
    pub config: Config,
    pub year: i32,
    pub today: NaiveDate,
    pub grids: Vec<MonthGrid>,
    pub stats: YearStats,
    pub highlight: Highlight,
    /// Day whose details are shown under the grid
    pub selected: Option<CalendarDay>,
    pub form: SearchForm,
    pub theme: ThemeToggle,
    pub keymap: Keymap<Action>,
    pub clicks: ClickMap<Target>,
    /// First visible row of months
    pub scroll: u16,
    /// Month (1-12) to bring into view on the next draw
    pub reveal_month: Option<u32>,
    pub message: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: Box<dyn FlagStore>, today: NaiveDate) -> Self {
        let year = config
            .general
            .start_year
            .unwrap_or_else(|| today.year())
            .clamp(MIN_YEAR, MAX_YEAR);
        let keymap = build_keymap(&config);

        Self {
            year,
            today,
            grids: render_calendar(year),
            stats: compute_stats(year),
            highlight: Highlight::None,
            selected: None,
            form: SearchForm {
                year: year.to_string(),
                ..SearchForm::default()
            },
            theme: ThemeToggle::load(store, THEME_FLAG),
            keymap,
            clicks: ClickMap::new(),
            scroll: 0,
            reveal_month: None,
            message: None,
            show_help: false,
            should_quit: false,
            config,
        }
    }

    /// Show `year`. Highlights belong to the previous grid and are dropped.
    pub fn set_year(&mut self, year: i32) {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        if year == self.year {
            return;
        }
        tracing::debug!(from = self.year, to = year, "year changed");
        self.year = year;
        self.grids = render_calendar(year);
        self.stats = compute_stats(year);
        self.highlight = Highlight::None;
        self.selected = None;
    }

    pub fn prev_year(&mut self) {
        self.set_year(self.year - 1);
    }

    pub fn next_year(&mut self) {
        self.set_year(self.year + 1);
    }

    pub fn toggle_theme(&mut self) {
        if let Err(e) = self.theme.toggle() {
            tracing::warn!(error = %e, "could not persist theme");
            self.message = Some(format!("Could not save theme: {}", e));
        }
    }

    /// Run the search form.
    pub fn search_date(&mut self) {
        let query = match SearchQuery::parse(&self.form.year, &self.form.month, &self.form.day) {
            Ok(query) => query,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };

        self.highlight = Highlight::None;
        self.selected = None;
        self.set_year(query.year);
        self.highlight = query.highlight();
        if let Highlight::Date(date) = self.highlight {
            self.selected = Some(classify(date));
        }
        self.reveal_month = self.highlight.month();
        self.form.focus = None;
        tracing::debug!(year = query.year, highlight = ?self.highlight, "search");
    }

    /// Reset the form to the shown year and drop highlights.
    pub fn clear_search(&mut self) {
        self.form.year = self.year.to_string();
        self.form.month.clear();
        self.form.day.clear();
        self.highlight = Highlight::None;
        self.selected = None;
    }

    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected = Some(classify(date));
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn handle_event(&mut self, event: &Event) {
        let clicks = std::mem::take(&mut self.clicks);
        dispatch(self, &clicks, event);
        self.clicks = clicks;
    }

    fn edit_form(&mut self, field: FormField, key: &KeyBinding) {
        match key.key {
            KeyCode::Esc => self.form.focus = None,
            KeyCode::Enter => self.search_date(),
            KeyCode::Tab => self.form.focus = Some(field.next()),
            KeyCode::BackTab => self.form.focus = Some(field.prev()),
            KeyCode::Backspace => {
                self.form.value_mut(field).pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() && key.modifiers.is_empty() => {
                let value = self.form.value_mut(field);
                if value.len() < field.max_len() {
                    value.push(c);
                }
            }
            _ => {}
        }
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::PrevYear => self.prev_year(),
            Action::NextYear => self.next_year(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::Search => self.form.focus = Some(FormField::Year),
            Action::ClearSearch => self.clear_search(),
            Action::ThisYear => self.set_year(self.today.year()),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
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
        self.message = None;

        if let Some(field) = self.form.focus {
            self.edit_form(field, key);
            return true;
        }

        match self.keymap.get(key) {
            Some(action) => {
                self.run_action(action);
                true
            }
            None => false,
        }
    }

    fn on_click(&mut self, target: Target) -> bool {
        if self.show_help {
            self.show_help = false;
            return true;
        }
        self.message = None;

        match target {
            Target::PrevYear => self.prev_year(),
            Target::NextYear => self.next_year(),
            Target::ToggleTheme => self.toggle_theme(),
            Target::Field(field) => self.form.focus = Some(field),
            Target::Search => self.search_date(),
            Target::ClearSearch => self.clear_search(),
            Target::Day(date) => {
                self.form.focus = None;
                self.select_day(date);
            }
        }
        true
    }
}

fn build_keymap(config: &Config) -> Keymap<Action> {
    let mut keymap = Keymap::new()
        .with(key(KeyCode::Left), Action::PrevYear)
        .with(key(KeyCode::Right), Action::NextYear)
        .with(plain('t'), Action::ToggleTheme)
        .with(plain('/'), Action::Search)
        .with(plain('c'), Action::ClearSearch)
        .with(key(KeyCode::Home), Action::ThisYear)
        .with(key(KeyCode::Up), Action::ScrollUp)
        .with(key(KeyCode::Down), Action::ScrollDown)
        .with(plain('h'), Action::PrevYear)
        .with(plain('l'), Action::NextYear)
        .with(plain('k'), Action::ScrollUp)
        .with(plain('j'), Action::ScrollDown)
        .with(plain('?'), Action::Help)
        .with(plain('q'), Action::Quit);

    let keys = &config.keys;
    for (notation, action) in [
        (&keys.prev_year, Action::PrevYear),
        (&keys.next_year, Action::NextYear),
        (&keys.toggle_theme, Action::ToggleTheme),
        (&keys.search, Action::Search),
        (&keys.clear_search, Action::ClearSearch),
    ] {
        if let Err(e) = keymap.bind_str(notation, action) {
            tracing::warn!(key = %notation, error = %e, "ignoring invalid key binding");
        }
    }
    keymap
}
