use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, EditTarget, Mode, RowNode};

use super::common::TextInput;

/// Handle a key in navigate mode
pub fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => {
            if app.carrying.take().is_some() {
                app.info("move cancelled");
            }
        }
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Home => app.cursor = 0,
        KeyCode::End => app.cursor = app.rows().len().saturating_sub(1),
        KeyCode::Enter => {
            if app.carrying.is_some() {
                drop_carry(app);
            } else {
                toggle_expansion(app);
            }
        }
        KeyCode::Tab => toggle_expansion(app),
        KeyCode::Char(' ') => toggle_completion(app),
        KeyCode::Char('a') => {
            app.form.clear();
            app.mode = Mode::AddTask;
        }
        KeyCode::Char('o') => open_subtask_prompt(app),
        KeyCode::Char('e') => open_edit_prompt(app),
        KeyCode::Char('d') => open_delete_confirm(app),
        KeyCode::Char('m') => {
            if app.carrying.is_some() {
                drop_carry(app);
            } else {
                pick_up(app);
            }
        }
        KeyCode::Char('c') => {
            app.filter.show_completed = !app.filter.show_completed;
            app.clamp_cursor();
        }
        KeyCode::Char('s') => {
            app.filter.sort = app.filter.sort.cycled();
            app.info(format!("sort: {}", app.filter.sort.label()));
            app.clamp_cursor();
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('/') => {
            app.input = TextInput::with_text(&app.filter.query);
            app.mode = Mode::Search;
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let count = app.rows().len();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    let next = app.cursor as isize + delta;
    app.cursor = next.clamp(0, count as isize - 1) as usize;
}

fn toggle_expansion(app: &mut App) {
    let Some(row) = app.cursor_row() else { return };
    if let RowNode::Task { id } = row.node {
        let has_children = app.store.task(&id).is_some_and(|t| !t.subtasks.is_empty());
        if has_children {
            app.toggle_expanded(&id);
            app.clamp_cursor();
        }
    }
}

fn toggle_completion(app: &mut App) {
    let Some(row) = app.cursor_row() else { return };
    let result = match &row.node {
        RowNode::Task { id } => app.store.toggle_completed(id).map(|_| ()),
        RowNode::Subtask { task_id, sub_id } => {
            app.store.toggle_subtask(task_id, sub_id).map(|_| ())
        }
    };
    match result {
        Ok(()) => {
            app.persist();
            // A freshly-completed task may leave the view
            app.clamp_cursor();
        }
        Err(e) => app.error(e.to_string()),
    }
}

fn open_subtask_prompt(app: &mut App) {
    let Some(row) = app.cursor_row() else { return };
    let (task_id, parent_sub_id) = match row.node {
        RowNode::Task { id } => (id, None),
        RowNode::Subtask { task_id, sub_id } => (task_id, Some(sub_id)),
    };
    app.input = TextInput::default();
    app.mode = Mode::AddSubtask {
        task_id,
        parent_sub_id,
    };
}

fn open_edit_prompt(app: &mut App) {
    let Some(row) = app.cursor_row() else { return };
    let (target, current) = match row.node {
        RowNode::Task { id } => {
            let Some(task) = app.store.task(&id) else { return };
            (EditTarget::Task(id.clone()), task.title.clone())
        }
        RowNode::Subtask { task_id, sub_id } => {
            let Some(sub) = app.store.find_subtask(&task_id, &sub_id) else {
                return;
            };
            let title = sub.title.clone();
            (EditTarget::Subtask { task_id, sub_id }, title)
        }
    };
    app.input = TextInput::with_text(&current);
    app.mode = Mode::EditTitle(target);
}

fn open_delete_confirm(app: &mut App) {
    let Some(row) = app.cursor_row() else { return };
    let action = match row.node {
        RowNode::Task { id } => ConfirmAction::DeleteTask(id),
        RowNode::Subtask { task_id, sub_id } => {
            ConfirmAction::DeleteSubtask { task_id, sub_id }
        }
    };
    app.mode = Mode::Confirm(action);
}

/// Start carrying the top-level task under the cursor
fn pick_up(app: &mut App) {
    let Some(row) = app.cursor_row() else { return };
    match row.node {
        RowNode::Task { id } => app.carrying = Some(id),
        RowNode::Subtask { .. } => {
            app.error("only top-level tasks can be reordered");
        }
    }
}

/// Drop the carried task onto the task under the cursor, exchanging their
/// positions. Both ids must still resolve; dropping a task onto itself is
/// a plain cancel.
fn drop_carry(app: &mut App) {
    let Some(source) = app.carrying.take() else { return };
    let Some(row) = app.cursor_row() else {
        app.error("drop on a task row");
        app.carrying = Some(source);
        return;
    };
    let RowNode::Task { id: target } = row.node else {
        app.error("drop on a top-level task");
        app.carrying = Some(source);
        return;
    };
    if target == source {
        return;
    }
    match app.store.swap_tasks(&source, &target) {
        Ok(()) => app.persist(),
        Err(e) => app.error(e.to_string()),
    }
}
