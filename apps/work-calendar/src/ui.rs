//! UI rendering for the work calendar.

use crate::app::{Action, App, FormField, Target};
use crate::calendar::{CalendarDay, DayKind};
use crate::grid::{MonthGrid, DAY_NAMES, MONTH_NAMES};
use crate::search::Highlight;
use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_theme::Palette;

/// Seven 3-column day cells plus borders.
const MONTH_WIDTH: u16 = 23;
/// Title border, weekday header, six weeks, bottom border.
const MONTH_HEIGHT: u16 = 9;
const MAX_COLUMNS: u16 = 4;

pub fn draw(f: &mut Frame, app: &mut App) {
    app.clicks.clear();
    let palette = app.theme.palette();
    f.render_widget(Block::default().style(palette.text()), f.area());

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.block_border())
        .title(" Work Calendar ")
        .title_style(palette.title());
    let inner = outer.inner(f.area());
    f.render_widget(outer, f.area());

    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(MONTH_HEIGHT),
    ];
    if app.config.display.show_legend {
        constraints.push(Constraint::Length(1));
    }
    if app.config.display.show_stats {
        constraints.push(Constraint::Length(1));
    }
    constraints.extend([Constraint::Length(1), Constraint::Length(1)]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    draw_header(f, app, &palette, chunks[0]);
    draw_search(f, app, &palette, chunks[1]);
    draw_months(f, app, &palette, chunks[2]);

    let mut next = 3;
    if app.config.display.show_legend {
        draw_legend(f, &palette, chunks[next]);
        next += 1;
    }
    if app.config.display.show_stats {
        draw_stats(f, app, &palette, chunks[next]);
        next += 1;
    }
    draw_details(f, app, &palette, chunks[next]);
    draw_footer(f, app, &palette, chunks[next + 1]);

    if app.show_help {
        draw_help(f, app, &palette);
    }
}

fn draw_header(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let theme_label = format!("[{}]", app.theme.mode().toggle_label());
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(6),
            Constraint::Length(8),
            Constraint::Length(theme_label.len() as u16),
        ])
        .split(area);

    let button = Style::default().fg(palette.accent);
    f.render_widget(Paragraph::new("[< Prev]").style(button), cells[0]);
    f.render_widget(
        Paragraph::new(app.year.to_string())
            .style(palette.title())
            .alignment(Alignment::Center),
        cells[1],
    );
    f.render_widget(Paragraph::new("[Next >]").style(button), cells[2]);
    f.render_widget(Paragraph::new(theme_label).style(button), cells[3]);

    app.clicks.register(cells[0], Target::PrevYear);
    app.clicks.register(cells[2], Target::NextYear);
    app.clicks.register(cells[3], Target::ToggleTheme);
}

fn draw_search(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    for (field, cell) in FormField::ALL.iter().zip(cells.iter()) {
        let focused = app.form.focus == Some(*field);
        let mut text = app.form.value(*field).to_string();
        if focused {
            text.push('_');
        }
        let border = if focused {
            Style::default().fg(palette.accent)
        } else {
            palette.block_border()
        };
        let input = Paragraph::new(text).style(palette.text()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(field.label()),
        );
        f.render_widget(input, *cell);
        app.clicks.register(*cell, Target::Field(*field));
    }

    for (label, target, cell) in [
        ("Search", Target::Search, cells[3]),
        ("Clear", Target::ClearSearch, cells[4]),
    ] {
        let button = Paragraph::new(label)
            .style(Style::default().fg(palette.accent))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(palette.block_border()));
        f.render_widget(button, cell);
        app.clicks.register(cell, target);
    }
}

fn draw_months(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let columns = (area.width / MONTH_WIDTH).clamp(1, MAX_COLUMNS) as usize;
    let total_rows = MONTH_NAMES.len().div_ceil(columns);
    let visible_rows = ((area.height / MONTH_HEIGHT) as usize).max(1);

    let mut scroll = app.scroll as usize;
    if let Some(month) = app.reveal_month.take() {
        let row = (month as usize).saturating_sub(1) / columns;
        if row < scroll {
            scroll = row;
        } else if row >= scroll + visible_rows {
            scroll = row + 1 - visible_rows;
        }
    }
    scroll = scroll.min(total_rows.saturating_sub(visible_rows));
    app.scroll = scroll as u16;

    let grids = std::mem::take(&mut app.grids);
    for (slot, row) in (scroll..total_rows.min(scroll + visible_rows)).enumerate() {
        for column in 0..columns {
            let Some(grid) = grids.get(row * columns + column) else {
                break;
            };
            let rect = Rect::new(
                area.x + column as u16 * MONTH_WIDTH,
                area.y + slot as u16 * MONTH_HEIGHT,
                MONTH_WIDTH.min(area.width),
                MONTH_HEIGHT.min(area.height),
            )
            .intersection(area);
            draw_month(f, app, palette, grid, rect);
        }
    }
    app.grids = grids;
}

fn draw_month(f: &mut Frame, app: &mut App, palette: &Palette, grid: &MonthGrid, area: Rect) {
    let whole_month = matches!(
        app.highlight,
        Highlight::Month { year, month } if year == grid.year && month == grid.month
    );
    let border = if whole_month {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        palette.block_border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(grid.name)
        .title_style(palette.title());
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let header: Vec<Span> = DAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i >= 5 { Style::default().fg(palette.weekend) } else { palette.dim() };
            Span::styled(format!("{:<3}", &name[..2]), style)
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(header)), Rect { height: 1, ..inner });

    for (week_index, week) in grid.weeks().enumerate() {
        let y = inner.y + 1 + week_index as u16;
        if y >= inner.bottom() {
            break;
        }
        let mut spans = Vec::with_capacity(14);
        for (col, cell) in week.iter().enumerate() {
            match cell {
                Some(day) => {
                    spans.push(Span::styled(format!("{:>2}", day.date.day()), day_style(app, palette, day)));
                    let x = inner.x + col as u16 * 3;
                    app.clicks.register(Rect::new(x, y, 2, 1).intersection(inner), Target::Day(day.date));
                }
                None => spans.push(Span::raw("  ")),
            }
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), Rect::new(inner.x, y, inner.width, 1));
    }
}

fn day_style(app: &App, palette: &Palette, day: &CalendarDay) -> Style {
    let mut style = match day.kind {
        DayKind::Holiday => Style::default().fg(palette.holiday).add_modifier(Modifier::BOLD),
        DayKind::ShortDay => Style::default().fg(palette.short_day),
        DayKind::Weekend => Style::default().fg(palette.weekend),
        DayKind::Workday => Style::default().fg(palette.fg),
    };
    if app.highlight.contains(day.date) {
        style = style.bg(palette.highlight).add_modifier(Modifier::BOLD);
    }
    if app.is_today(day.date) {
        style = style.fg(palette.bg).bg(palette.today);
    }
    if app.selected.map(|s| s.date) == Some(day.date) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

fn draw_legend(f: &mut Frame, palette: &Palette, area: Rect) {
    let entries = [
        (DayKind::Holiday.label(), palette.holiday),
        (DayKind::ShortDay.label(), palette.short_day),
        (DayKind::Weekend.label(), palette.weekend),
        (DayKind::Workday.label(), palette.fg),
        ("Today", palette.today),
    ];
    let mut spans = Vec::new();
    for (label, color) in entries {
        spans.push(Span::styled("■ ", Style::default().fg(color)));
        spans.push(Span::styled(format!("{}  ", label), palette.dim()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_stats(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let stats = &app.stats;
    let text = format!(
        "Total days: {}  Work days: {}  Weekends: {}  Holidays: {}",
        stats.total_days, stats.work_days, stats.weekend_days, stats.holiday_days
    );
    f.render_widget(Paragraph::new(text).style(palette.text()), area);
}

fn draw_details(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let line = if let Some(message) = &app.message {
        Line::styled(message.clone(), palette.error_text())
    } else if let Some(day) = app.selected {
        let mut text = format!("{}: {}", day.date.format("%A, %-d %B %Y"), day.kind.label());
        if let Some(name) = day.holiday {
            text.push_str(&format!(" ({})", name));
        }
        Line::styled(text, palette.text())
    } else if let Highlight::Month { year, month } = app.highlight {
        let name = MONTH_NAMES[(month as usize - 1) % 12];
        Line::styled(format!("Showing {} {}", name, year), palette.text())
    } else {
        Line::styled("Click a day for details", palette.dim())
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let keys = &app.keymap;
    let text = format!(
        "{}/{}:Year  {}:Search  {}:Clear  {}:Theme  {}:Help  {}:Quit",
        keys.label(Action::PrevYear),
        keys.label(Action::NextYear),
        keys.label(Action::Search),
        keys.label(Action::ClearSearch),
        keys.label(Action::ToggleTheme),
        keys.label(Action::Help),
        keys.label(Action::Quit),
    );
    f.render_widget(Paragraph::new(text).style(palette.dim()), area);
}

fn draw_help(f: &mut Frame, app: &App, palette: &Palette) {
    let area = tui_shell::centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let keys = &app.keymap;
    let lines = vec![
        Line::from("Navigation"),
        Line::from(format!("  {:<12} Previous / next year", format!("{} {}", keys.label(Action::PrevYear), keys.label(Action::NextYear)))),
        Line::from(format!("  {:<12} Current year", keys.label(Action::ThisYear))),
        Line::from(format!("  {:<12} Scroll months", "Up Down")),
        Line::from(""),
        Line::from("Search"),
        Line::from(format!("  {:<12} Edit year, month, day", keys.label(Action::Search))),
        Line::from(format!("  {:<12} Next field", "Tab")),
        Line::from(format!("  {:<12} Run search", "Enter")),
        Line::from(format!("  {:<12} Leave the form", "Esc")),
        Line::from(format!("  {:<12} Clear highlight", keys.label(Action::ClearSearch))),
        Line::from(""),
        Line::from(format!("  {:<12} Toggle theme", keys.label(Action::ToggleTheme))),
        Line::from("Mouse: click buttons, fields and days"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];
    let help = Paragraph::new(lines)
        .style(palette.text())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}
