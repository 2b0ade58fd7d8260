//! UI rendering for the weather widget.

use crate::app::{Action, App, Panel, Target};
use crate::render::WeatherView;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_theme::Palette;

pub fn draw(f: &mut Frame, app: &mut App) {
    app.clicks.clear();
    let palette = app.theme.palette();
    f.render_widget(Block::default().style(palette.text()), f.area());

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.block_border())
        .title(" Weather ")
        .title_style(palette.title());
    let inner = outer.inner(f.area());
    f.render_widget(outer, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1)])
        .split(inner);

    draw_form(f, app, &palette, chunks[0]);
    match &app.panel {
        Panel::Empty => draw_centered(f, chunks[1], "Enter a city and press Enter", palette.dim()),
        Panel::Loading => draw_centered(f, chunks[1], "Loading…", palette.dim()),
        Panel::Error(message) => draw_centered(f, chunks[1], &format!("✗ {}", message), palette.error_text()),
        Panel::Report(view) => draw_report(f, view, &palette, chunks[1]),
    }
    draw_footer(f, app, &palette, chunks[2]);

    if app.show_help {
        draw_help(f, app, &palette);
    }
}

fn draw_form(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let units_label = format!("{} {}", app.units.as_str(), app.units.temperature_label());
    let theme_label = app.theme.mode().toggle_label();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(14),
        ])
        .split(area);

    let city = Paragraph::new(format!("{}_", app.city)).style(palette.text()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title("City"),
    );
    f.render_widget(city, cells[0]);
    app.clicks.register(cells[0], Target::City);

    let (search_label, search_style) = if app.loading {
        ("Loading…", palette.dim())
    } else {
        ("Search", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
    };

    for (label, style, title, target, cell) in [
        (units_label.as_str(), Style::default().fg(palette.fg), "Units", Target::Units, cells[1]),
        (search_label, search_style, "", Target::Search, cells[2]),
        (theme_label, Style::default().fg(palette.fg), "Theme", Target::Theme, cells[3]),
    ] {
        let button = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.block_border())
                    .title(title),
            );
        f.render_widget(button, cell);
        app.clicks.register(cell, target);
    }
}

fn draw_centered(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(1)])
        .split(area);
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, rows[1]);
}

fn draw_report(f: &mut Frame, view: &WeatherView, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(6),
        ])
        .split(area);

    let badge = Span::styled(
        format!(" {} ", view.badge),
        Style::default().fg(palette.bg).bg(palette.accent),
    );
    let header = vec![
        Line::from(vec![
            Span::styled(view.title.clone(), palette.title()),
            Span::raw("  "),
            badge,
        ]),
        Line::styled(view.subtitle.clone(), palette.dim()),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    let current = vec![
        Line::from(vec![
            Span::styled(format!("{}  ", view.icon), Style::default().fg(palette.accent)),
            Span::styled(view.temperature.clone(), Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Feels like ", palette.dim()),
            Span::styled(view.feels_like.clone(), Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
        ]),
    ];
    f.render_widget(Paragraph::new(current), chunks[2]);

    let stats = Line::from(vec![
        Span::styled("Humidity ", palette.dim()),
        Span::styled(view.humidity.clone(), palette.text()),
        Span::styled("   Wind ", palette.dim()),
        Span::styled(view.wind.clone(), palette.text()),
        Span::styled("   Pressure ", palette.dim()),
        Span::styled(view.pressure.clone(), palette.text()),
    ]);
    f.render_widget(Paragraph::new(stats), chunks[3]);

    let heading = Line::from(vec![
        Span::styled("5-Day Forecast", palette.title()),
        Span::styled("  Daily summary", palette.dim()),
    ]);
    f.render_widget(Paragraph::new(heading), chunks[4]);

    if view.forecast.is_empty() {
        return;
    }
    let count = view.forecast.len() as u32;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); view.forecast.len()])
        .split(chunks[5]);
    for (card, cell) in view.forecast.iter().zip(cards.iter()) {
        let lines = vec![
            Line::styled(card.weekday.clone(), palette.title()),
            Line::styled(card.date.clone(), palette.dim()),
            Line::from(card.icon),
            Line::from(vec![
                Span::styled(card.high.clone(), Style::default().fg(palette.error)),
                Span::raw(" "),
                Span::styled(card.low.clone(), Style::default().fg(palette.accent)),
            ]),
            Line::styled(card.description.clone(), palette.dim()),
        ];
        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(palette.block_border()));
        f.render_widget(widget, *cell);
    }
}

fn draw_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    if let Some(notice) = &app.notice {
        f.render_widget(Paragraph::new(notice.as_str()).style(palette.error_text()), area);
        return;
    }
    let keys = &app.keymap;
    let text = format!(
        "{}:Search  {}:Units  {}:Theme  {}:Help  {}:Quit",
        keys.label(Action::Submit),
        keys.label(Action::ToggleUnits),
        keys.label(Action::ToggleTheme),
        keys.label(Action::Help),
        keys.label(Action::Quit),
    );
    f.render_widget(Paragraph::new(text).style(palette.dim()), area);
}

fn draw_help(f: &mut Frame, app: &App, palette: &Palette) {
    let area = tui_shell::centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);

    let keys = &app.keymap;
    let lines = vec![
        Line::from("Type a city name, then search."),
        Line::from(""),
        Line::from(format!("  {:<10} Search", keys.label(Action::Submit))),
        Line::from(format!("  {:<10} Metric / imperial", keys.label(Action::ToggleUnits))),
        Line::from(format!("  {:<10} Dark / light theme", keys.label(Action::ToggleTheme))),
        Line::from(format!("  {:<10} Quit", keys.label(Action::Quit))),
        Line::from(""),
        Line::from("Mouse: click Units, Search or Theme"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];
    let help = Paragraph::new(lines)
        .style(palette.text())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}
