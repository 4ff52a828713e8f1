use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::input::common::TextInput;
use crate::tui::input::form::FormField;
use crate::tui::theme::Theme;

use super::centered_rect;

/// Render the add-task form as a centered overlay
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let popup = centered_rect(area, 56, 8);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(" new task ")
        .title_style(Style::default().fg(theme.text_bright).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let form = &app.form;
    let lines = vec![
        field_line(theme, "title", &form.title, form.focus == FormField::Title),
        field_line(theme, "due", &form.due, form.focus == FormField::Due),
        priority_line(app),
        field_line(theme, "tag", &form.tag, form.focus == FormField::Tag),
        Line::default(),
        Line::from(Span::styled(
            " Enter add · Tab next field · Esc cancel",
            Style::default().fg(theme.dim).bg(bg),
        )),
    ];

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

fn field_line<'a>(theme: &Theme, label: &str, input: &TextInput, focused: bool) -> Line<'a> {
    let bg = theme.background;
    let label_style = if focused {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };

    let mut spans = vec![Span::styled(format!(" {label:<9}"), label_style)];
    push_input_spans(&mut spans, theme, input, focused);
    Line::from(spans)
}

fn priority_line<'a>(app: &App) -> Line<'a> {
    let theme = &app.theme;
    let bg = theme.background;
    let focused = app.form.focus == FormField::Priority;
    let label_style = if focused {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };

    let priority = app.form.priority;
    let value = if focused {
        format!("‹ {} ›", priority.label())
    } else {
        priority.label().to_string()
    };
    Line::from(vec![
        Span::styled(" priority ".to_string(), label_style),
        Span::styled(
            value,
            Style::default().fg(theme.priority_color(priority)).bg(bg),
        ),
    ])
}

/// Push the input's text with a cursor bar at the caret (focused only)
pub(super) fn push_input_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    theme: &Theme,
    input: &TextInput,
    focused: bool,
) {
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text_bright).bg(bg);
    if !focused {
        spans.push(Span::styled(input.text().to_string(), text_style));
        return;
    }
    let (before, after) = input.text().split_at(input.cursor());
    spans.push(Span::styled(before.to_string(), text_style));
    spans.push(Span::styled(
        "\u{258C}".to_string(),
        Style::default().fg(theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(after.to_string(), text_style));
}
