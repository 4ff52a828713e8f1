use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

const BINDINGS: &[(&str, &str)] = &[
    ("j / k, ↓ / ↑", "move the cursor"),
    ("Enter, Tab", "expand or collapse subtasks"),
    ("space", "toggle completion"),
    ("a", "add a task"),
    ("o", "add a subtask under the cursor"),
    ("e", "edit title"),
    ("d", "delete (with confirmation)"),
    ("m", "pick up / drop to reorder"),
    ("/", "search titles"),
    ("c", "show or hide completed tasks"),
    ("s", "cycle sort: manual, due, priority"),
    ("t", "toggle dark / light theme"),
    ("q", "quit"),
];

/// Render the key binding reference as a centered overlay
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let popup = centered_rect(area, 52, BINDINGS.len() as u16 + 3);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .title(" keys ")
        .title_style(Style::default().fg(theme.text_bright).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::with_capacity(BINDINGS.len() + 1);
    for (keys, action) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {keys:<14}"),
                Style::default().fg(theme.highlight).bg(bg),
            ),
            Span::styled(
                (*action).to_string(),
                Style::default().fg(theme.text).bg(bg),
            ),
        ]));
    }
    lines.push(Line::from(Span::styled(
        " any key to close",
        Style::default().fg(theme.dim).bg(bg),
    )));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}
