use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ConfirmAction, Mode};

use super::form_view::push_input_spans;

/// Render the status row (bottom of screen): prompts, notices, hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;

    let line = if let Some(notice) = &app.notice {
        let style = if notice.error {
            Style::default()
                .fg(theme.warning_fg)
                .bg(theme.warning_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(bg)
        };
        Line::from(Span::styled(format!(" {} ", notice.text), style))
    } else {
        match &app.mode {
            Mode::Navigate => navigate_line(app),
            Mode::Search => prompt_line(app, "/", "Enter keep · Esc clear"),
            Mode::EditTitle(_) => prompt_line(app, " edit title: ", "Enter save · Esc cancel"),
            Mode::AddSubtask { parent_sub_id, .. } => {
                if parent_sub_id.is_some() {
                    prompt_line(app, " nested subtask: ", "Enter add · Esc cancel")
                } else {
                    prompt_line(app, " subtask: ", "Enter add another · Esc done")
                }
            }
            Mode::Confirm(action) => confirm_line(app, action),
            Mode::AddTask => Line::from(Span::styled(
                " adding a task…",
                Style::default().fg(theme.dim).bg(bg),
            )),
        }
    };

    // Pad the background across the full row
    let mut spans = line.spans;
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn navigate_line<'a>(app: &App) -> Line<'a> {
    let theme = &app.theme;
    let bg = theme.background;

    if let Some(id) = &app.carrying {
        let title = app
            .store
            .task(id)
            .map(|t| t.title.clone())
            .unwrap_or_else(|| "?".to_string());
        return Line::from(Span::styled(
            format!(" moving: {title} — j/k pick a target · Enter drop · Esc cancel"),
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }

    if app.persist_warning {
        return Line::from(Span::styled(
            " ⚠ storage unavailable — changes kept in memory only ".to_string(),
            Style::default()
                .fg(theme.warning_fg)
                .bg(theme.warning_bg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let mut spans = Vec::new();
    if !app.filter.query.is_empty() {
        spans.push(Span::styled(
            format!(" /{}", app.filter.query),
            Style::default().fg(theme.dim).bg(bg),
        ));
        spans.push(Span::styled("   ".to_string(), Style::default().bg(bg)));
    }
    spans.push(Span::styled(
        " a add · space done · o subtask · m move · / search · ? help".to_string(),
        Style::default().fg(theme.dim).bg(bg),
    ));
    Line::from(spans)
}

fn prompt_line<'a>(app: &App, label: &str, hint: &str) -> Line<'a> {
    let theme = &app.theme;
    let bg = theme.background;
    let mut spans = vec![Span::styled(
        label.to_string(),
        Style::default().fg(theme.text).bg(bg),
    )];
    push_input_spans(&mut spans, theme, &app.input, true);
    spans.push(Span::styled(
        format!("   {hint}"),
        Style::default().fg(theme.dim).bg(bg),
    ));
    Line::from(spans)
}

fn confirm_line<'a>(app: &App, action: &ConfirmAction) -> Line<'a> {
    let theme = &app.theme;
    let title = match action {
        ConfirmAction::DeleteTask(id) => app.store.task(id).map(|t| t.title.clone()),
        ConfirmAction::DeleteSubtask { task_id, sub_id } => app
            .store
            .find_subtask(task_id, sub_id)
            .map(|s| s.title.clone()),
    }
    .unwrap_or_else(|| "item".to_string());

    Line::from(Span::styled(
        format!(" delete \"{title}\" and everything under it? y/n "),
        Style::default()
            .fg(theme.warning_fg)
            .bg(theme.warning_bg)
            .add_modifier(Modifier::BOLD),
    ))
}
