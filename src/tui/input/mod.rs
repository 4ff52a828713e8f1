pub mod common;
pub mod confirm;
pub mod edit;
pub mod form;
pub mod navigate;
pub mod search;

use crossterm::event::KeyEvent;

use super::app::{App, Mode};

/// Route a key press to the active mode's handler
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // A notice lives until the next key press
    app.notice = None;

    // Any key dismisses the help overlay
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode.clone() {
        Mode::Navigate => navigate::handle(app, key),
        Mode::AddTask => form::handle(app, key),
        Mode::EditTitle(target) => edit::handle_edit(app, key, target),
        Mode::AddSubtask {
            task_id,
            parent_sub_id,
        } => edit::handle_add_subtask(app, key, task_id, parent_sub_id),
        Mode::Search => search::handle(app, key),
        Mode::Confirm(action) => confirm::handle(app, key, action),
    }
}
