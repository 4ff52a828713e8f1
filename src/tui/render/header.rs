use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::view::SortKey;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render the header: app name and task count on the left, filter state and
/// a clock on the right, with a separator rule underneath.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let count = app.store.len();
    let left = format!(
        " nest · {} task{}",
        count,
        if count == 1 { "" } else { "s" }
    );

    let mut state = Vec::new();
    if app.filter.sort != SortKey::None {
        state.push(format!("sort: {}", app.filter.sort.label()));
    }
    if app.filter.show_completed {
        state.push("completed shown".to_string());
    }
    let state = state.join(" · ");

    // The clock ticks with the event-loop redraw cadence
    let clock = Local::now().format("%H:%M:%S").to_string();
    let right = if state.is_empty() {
        format!("{clock} ")
    } else {
        format!("{state}   {clock} ")
    };

    let pad = width.saturating_sub(display_width(&left) + display_width(&right));
    let line = Line::from(vec![
        Span::styled(
            left,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)),
    ]);

    let rule = Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![line, rule]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
