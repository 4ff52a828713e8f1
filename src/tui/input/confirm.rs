use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, Mode};

/// Handle a key in the delete confirmation prompt
pub fn handle(app: &mut App, key: KeyEvent, action: ConfirmAction) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            perform(app, &action);
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('n') | KeyCode::Esc => app.mode = Mode::Navigate,
        _ => {}
    }
}

fn perform(app: &mut App, action: &ConfirmAction) {
    let result = match action {
        ConfirmAction::DeleteTask(id) => {
            let removed = app.store.remove_task(id);
            if removed.is_ok() {
                app.expanded.remove(id);
                if app.carrying.as_deref() == Some(id.as_str()) {
                    app.carrying = None;
                }
            }
            removed.map(|_| ())
        }
        ConfirmAction::DeleteSubtask { task_id, sub_id } => {
            app.store.remove_subtask(task_id, sub_id).map(|_| ())
        }
    };
    match result {
        Ok(()) => {
            app.persist();
            app.clamp_cursor();
        }
        Err(e) => app.error(e.to_string()),
    }
}
