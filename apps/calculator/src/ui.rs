//! UI rendering for the calculator.

use crate::app::App;
use crate::engine::KeypadKey;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const PANEL_WIDTH: u16 = 34;
const PANEL_HEIGHT: u16 = 22;

pub fn draw(f: &mut Frame, app: &mut App) {
    app.clicks.clear();
    let palette = app.palette;
    f.render_widget(Block::default().style(palette.text()), f.area());

    let panel = panel_area(f.area());
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.block_border())
        .title(" Calculator ")
        .title_style(palette.title());
    let inner = outer.inner(panel);
    f.render_widget(outer, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(1)])
        .split(inner);

    draw_display(f, app, chunks[0]);
    draw_keypad(f, app, chunks[1]);

    let footer = Paragraph::new("?:Help  q:Quit")
        .style(palette.dim())
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[2]);

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

fn draw_display(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette;
    let style = if app.calc.is_error() {
        palette.error_text()
    } else {
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)
    };

    // Keep the tail of long expressions visible
    let width = area.width.saturating_sub(2) as usize;
    let text = app.calc.display();
    let shown: String = if text.chars().count() > width {
        let skip = text.chars().count() - width;
        text.chars().skip(skip).collect()
    } else {
        text.to_string()
    };

    let display = Paragraph::new(shown)
        .style(style)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).border_style(palette.block_border()));
    f.render_widget(display, area);
}

fn draw_keypad(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (row_keys, row_area) in KeypadKey::ROWS.iter().zip(rows.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row_area);

        for (key, cell) in row_keys.iter().zip(cells.iter()) {
            let style = if app.last_pressed == Some(*key) {
                palette.selected()
            } else if *key == KeypadKey::Equals {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else if key.is_operator() {
                Style::default().fg(palette.accent)
            } else if matches!(key, KeypadKey::Clear | KeypadKey::Delete) {
                Style::default().fg(palette.error)
            } else {
                Style::default().fg(palette.fg)
            };

            let button = Paragraph::new(key.label())
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(palette.block_border()));
            f.render_widget(button, *cell);
            app.clicks.register(*cell, *key);
        }
    }
}

fn draw_help(f: &mut Frame, app: &App) {
    let area = tui_shell::centered_rect(80, 70, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from("Keyboard"),
        Line::from("  0-9 . ( ) + - * /   Type"),
        Line::from("  Enter               Evaluate"),
        Line::from("  Backspace           Delete last"),
        Line::from("  Esc                 Clear"),
        Line::from(""),
        Line::from("Mouse: click the keypad"),
        Line::from(""),
        Line::from("Press any key to close"),
    ];
    let help = Paragraph::new(lines)
        .style(app.palette.text())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}
