//! UI rendering for the stopwatch.

use crate::app::{Action, App};
use crate::stopwatch::Control;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const PANEL_WIDTH: u16 = 36;
const PANEL_HEIGHT: u16 = 11;

pub fn draw(f: &mut Frame, app: &mut App) {
    app.clicks.clear();
    let palette = app.palette;
    f.render_widget(Block::default().style(palette.text()), f.area());

    let panel = panel_area(f.area());
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.block_border())
        .title(" Stopwatch ")
        .title_style(palette.title());
    let inner = outer.inner(panel);
    f.render_widget(outer, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let running = app.stopwatch.is_running();
    let time_style = if running {
        Style::default().fg(palette.success).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(app.stopwatch.display())
            .style(time_style)
            .alignment(Alignment::Center),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(if running { "running" } else { "stopped" })
            .style(palette.dim())
            .alignment(Alignment::Center),
        chunks[2],
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2); 2])
        .split(chunks[3]);
    let start_label = if running { "Stop" } else { "Start" };
    for (label, control, area) in [
        (start_label, Control::StartStop, buttons[0]),
        ("Reset", Control::Reset, buttons[1]),
    ] {
        let style = if control == Control::StartStop && running {
            palette.selected()
        } else if control == Control::Reset && !app.stopwatch.can_reset() {
            palette.dim()
        } else {
            Style::default().fg(palette.accent)
        };
        let button = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(palette.block_border()));
        f.render_widget(button, area);
        app.clicks.register(area, control);
    }

    let footer = format!(
        "space:Start/Stop  r:Reset  {}:Help  {}:Quit",
        app.keymap.label(Action::Help),
        app.keymap.label(Action::Quit)
    );
    f.render_widget(
        Paragraph::new(footer).style(palette.dim()).alignment(Alignment::Center),
        chunks[5],
    );

    if app.show_help {
        draw_help(f, app);
    }
}

fn panel_area(area: Rect) -> Rect {
    let width = PANEL_WIDTH.min(area.width);
    let height = PANEL_HEIGHT.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_help(f: &mut Frame, app: &App) {
    let area = tui_shell::centered_rect(80, 70, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(format!("  space, s, {:<8} Start / stop", app.keymap.label(Action::StartStop))),
        Line::from(format!("  r, {:<15} Reset (while stopped)", app.keymap.label(Action::Reset))),
        Line::from(""),
        Line::from("Mouse: click Start/Stop or Reset"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];
    let help = Paragraph::new(lines)
        .style(app.palette.text())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}
