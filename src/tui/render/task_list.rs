use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::{Subtask, Task};
use crate::tui::app::{App, RowNode};
use crate::util::unicode::{display_width, truncate_to_width};

const PROGRESS_CELLS: usize = 8;

/// Render the flattened task tree
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.rows();
    let visible_height = area.height as usize;
    if visible_height == 0 {
        return;
    }

    if rows.is_empty() {
        let message = if app.filter.query.is_empty() {
            " No tasks — press a to add one"
        } else {
            " no matching tasks"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    // Clamp cursor and keep it inside the viewport
    app.cursor = app.cursor.min(rows.len() - 1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor - visible_height + 1;
    }

    let scroll = app.scroll_offset;
    let end = rows.len().min(scroll + visible_height);
    let mut lines: Vec<Line> = Vec::with_capacity(end - scroll);

    for (row, idx) in rows[scroll..end].iter().zip(scroll..end) {
        let is_cursor = idx == app.cursor;
        let line = match &row.node {
            RowNode::Task { id } => match app.store.task(id) {
                Some(task) => task_line(app, task, is_cursor, area.width as usize),
                None => continue,
            },
            RowNode::Subtask { task_id, sub_id } => {
                match app.store.find_subtask(task_id, sub_id) {
                    Some(sub) => subtask_line(app, sub, row.depth, is_cursor, area.width as usize),
                    None => continue,
                }
            }
        };
        lines.push(line);
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn task_line<'a>(app: &App, task: &Task, is_cursor: bool, width: usize) -> Line<'a> {
    let theme = &app.theme;
    let bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let carried = app.carrying.as_deref() == Some(task.id.as_str());

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(
        if carried { " ⇅ " } else { "   " }.to_string(),
        Style::default().fg(theme.highlight).bg(bg),
    ));

    let expander = if task.subtasks.is_empty() {
        "  "
    } else if app.expanded.contains(&task.id) {
        "▾ "
    } else {
        "▸ "
    };
    spans.push(Span::styled(
        expander.to_string(),
        Style::default().fg(theme.dim).bg(bg),
    ));

    spans.push(checkbox_span(task.completed, theme.text, bg));
    spans.push(Span::styled(
        "● ".to_string(),
        Style::default().fg(theme.priority_color(task.priority)).bg(bg),
    ));

    // Suffix parts, assembled first so the title can be truncated to fit
    let mut suffix = String::new();
    if let Some(due) = task.due {
        suffix.push_str(&format!("  due {}", due.format("%Y-%m-%d %H:%M")));
    }
    if !task.tag.is_empty() {
        suffix.push_str(&format!("  #{}", task.tag));
    }
    let progress = task.progress();
    let progress_width = if progress.total > 0 {
        // "  1/3 ████░░░░ 33%"
        2 + format!("{}/{}", progress.done, progress.total).len() + 1 + PROGRESS_CELLS + 5
    } else {
        0
    };

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let budget = width
        .saturating_sub(used + display_width(&suffix) + progress_width + 1)
        .max(1);
    let title = truncate_to_width(&task.title, budget);

    let mut title_style = Style::default()
        .fg(if is_cursor {
            theme.text_bright
        } else {
            theme.text
        })
        .bg(bg);
    if task.completed {
        title_style = Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    spans.push(Span::styled(title, title_style));

    if !suffix.is_empty() {
        spans.push(Span::styled(suffix, Style::default().fg(theme.dim).bg(bg)));
    }

    if progress.total > 0 {
        spans.push(Span::styled(
            format!("  {}/{} ", progress.done, progress.total),
            Style::default().fg(theme.dim).bg(bg),
        ));
        let percent = progress.percent() as usize;
        let filled = (percent * PROGRESS_CELLS + 50) / 100;
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(theme.progress_fill).bg(bg),
        ));
        spans.push(Span::styled(
            "░".repeat(PROGRESS_CELLS - filled),
            Style::default().fg(theme.progress_track).bg(bg),
        ));
        spans.push(Span::styled(
            format!(" {percent:>3}%"),
            Style::default().fg(theme.dim).bg(bg),
        ));
    }

    pad_line(spans, width, bg)
}

fn subtask_line<'a>(
    app: &App,
    sub: &Subtask,
    depth: usize,
    is_cursor: bool,
    width: usize,
) -> Line<'a> {
    let theme = &app.theme;
    let bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };

    let mut spans: Vec<Span> = Vec::new();
    spans.push(Span::styled(
        " ".repeat(3 + depth * 2),
        Style::default().bg(bg),
    ));
    spans.push(checkbox_span(sub.completed, theme.text, bg));

    let suffix = match sub.due {
        Some(due) => format!("  due {}", due.format("%Y-%m-%d %H:%M")),
        None => String::new(),
    };

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let budget = width
        .saturating_sub(used + display_width(&suffix) + 1)
        .max(1);
    let title = truncate_to_width(&sub.title, budget);

    let title_style = if sub.completed {
        Style::default()
            .fg(theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
            .fg(if is_cursor {
                theme.text_bright
            } else {
                theme.text
            })
            .bg(bg)
    };
    spans.push(Span::styled(title, title_style));

    if !suffix.is_empty() {
        spans.push(Span::styled(suffix, Style::default().fg(theme.dim).bg(bg)));
    }

    pad_line(spans, width, bg)
}

fn checkbox_span<'a>(completed: bool, fg: Color, bg: Color) -> Span<'a> {
    Span::styled(
        if completed { "[x] " } else { "[ ] " }.to_string(),
        Style::default().fg(fg).bg(bg),
    )
}

/// Extend the row's background to the full width
fn pad_line(mut spans: Vec<Span>, width: usize, bg: Color) -> Line {
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }
    Line::from(spans)
}
