use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use time_bullet_engine::{Clock, DocumentAccess};

use crate::app::{App, Focus, SettingsField};

pub fn ui<C: Clock>(f: &mut Frame, app: &App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(3),
                Constraint::Length(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    render_editor(f, app, chunks[0]);
    render_settings(f, app, chunks[1]);

    let help = Line::from(vec![
        Span::raw("Ctrl-S: Save | "),
        Span::raw("Tab: Settings | "),
        Span::raw("Esc/Ctrl-Q: Quit | "),
        Span::styled(app.status.clone(), Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(Paragraph::new(help), chunks[2]);
}

fn render_editor<C: Clock>(f: &mut Frame, app: &App<C>, area: ratatui::layout::Rect) {
    let title = format!(
        "{}{}",
        app.path.display(),
        if app.is_dirty() { " [+]" } else { "" }
    );

    let cursor = app.document.cursor();
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = cursor.line.saturating_sub(inner_height.saturating_sub(1));

    let lines = app.document.lines();
    let column = lines
        .get(cursor.line)
        .map_or(0, |line| display_width(line, cursor.ch));

    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let editor = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(editor, area);

    if app.focus == Focus::Editor {
        let max_x = area.right().saturating_sub(2);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(column).unwrap_or(u16::MAX))
            .min(max_x);
        let y = area
            .y
            .saturating_add(1)
            .saturating_add(u16::try_from(cursor.line - scroll).unwrap_or(u16::MAX));
        f.set_cursor_position(Position::new(x, y));
    }
}

/// Terminal columns taken by the first `chars` chars of `line`.
fn display_width(line: &str, chars: usize) -> usize {
    let prefix: String = line.chars().take(chars).collect();
    Span::raw(prefix).width()
}

fn render_settings<C: Clock>(f: &mut Frame, app: &App<C>, area: ratatui::layout::Rect) {
    let config = app.bullets.config();
    let highlight = |field: SettingsField| {
        if app.focus == Focus::Settings(field) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::raw("Time format: "),
            Span::styled(
                format!("{:<20}", config.time_format),
                highlight(SettingsField::TimeFormat),
            ),
            Span::styled(
                format!("  now: {}", app.bullets.timestamp()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw("Use UTC:     "),
            Span::styled(
                if config.use_utc { "[x]" } else { "[ ]" },
                highlight(SettingsField::UseUtc),
            ),
            Span::styled("  off = local time", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            "Tokens: YYYY MM DD HH mm ss SSS h A ddd MMM Z, [text] for literals",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let settings =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(settings, area);
}
