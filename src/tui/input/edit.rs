use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, EditTarget, Mode};

/// Handle a key in the edit-title prompt
pub fn handle_edit(app: &mut App, key: KeyEvent, target: EditTarget) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => {
            // Empty input cancels; nothing changes
            if app.input.is_blank() {
                app.mode = Mode::Navigate;
                return;
            }
            let title = app.input.take();
            let result = match &target {
                EditTarget::Task(id) => app.store.edit_title(id, &title),
                EditTarget::Subtask { task_id, sub_id } => {
                    app.store.edit_subtask_title(task_id, sub_id, &title)
                }
            };
            match result {
                Ok(()) => app.persist(),
                Err(e) => app.error(e.to_string()),
            }
            app.mode = Mode::Navigate;
        }
        _ => {
            app.input.handle_key(key);
        }
    }
}

/// Handle a key in the add-subtask prompt. With no parent the new node is a
/// leaf under the top-level task (and the prompt stays open for the next
/// one); with a parent it nests under that subtask and the prompt closes.
pub fn handle_add_subtask(
    app: &mut App,
    key: KeyEvent,
    task_id: String,
    parent_sub_id: Option<String>,
) {
    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => {
            if app.input.is_blank() {
                app.mode = Mode::Navigate;
                return;
            }
            let title = app.input.take();
            let result = match &parent_sub_id {
                None => app.store.add_subtask(&task_id, &title),
                Some(parent) => app.store.add_nested_subtask(&task_id, parent, &title),
            };
            match result {
                Ok(_) => {
                    // Reveal the new node
                    app.expanded.insert(task_id.clone());
                    app.persist();
                    if parent_sub_id.is_some() {
                        app.mode = Mode::Navigate;
                    }
                }
                Err(e) => {
                    app.error(e.to_string());
                    app.mode = Mode::Navigate;
                }
            }
        }
        _ => {
            app.input.handle_key(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::test_support::{add_task, test_app};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str, target: &EditTarget) {
        for c in text.chars() {
            handle_edit(app, key(KeyCode::Char(c)), target.clone());
        }
    }

    #[test]
    fn edit_commits_a_new_title() {
        let (mut app, _dir) = test_app();
        let id = add_task(&mut app, "old");
        let target = EditTarget::Task(id.clone());
        app.mode = Mode::EditTitle(target.clone());

        type_text(&mut app, "new", &target);
        handle_edit(&mut app, key(KeyCode::Enter), target);

        assert_eq!(app.store.task(&id).unwrap().title, "new");
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn blank_edit_input_is_a_no_op() {
        let (mut app, _dir) = test_app();
        let id = add_task(&mut app, "keep me");
        let target = EditTarget::Task(id.clone());
        app.mode = Mode::EditTitle(target.clone());

        handle_edit(&mut app, key(KeyCode::Enter), target);
        assert_eq!(app.store.task(&id).unwrap().title, "keep me");
        assert!(app.notice.is_none());
    }

    #[test]
    fn enter_commits_a_leaf_subtask_and_stays_open() {
        let (mut app, _dir) = test_app();
        let id = add_task(&mut app, "root");
        app.mode = Mode::AddSubtask {
            task_id: id.clone(),
            parent_sub_id: None,
        };

        for c in "first".chars() {
            handle_add_subtask(&mut app, key(KeyCode::Char(c)), id.clone(), None);
        }
        handle_add_subtask(&mut app, key(KeyCode::Enter), id.clone(), None);

        let task = app.store.task(&id).unwrap();
        assert_eq!(task.subtasks.len(), 1);
        assert_eq!(task.subtasks[0].title, "first");
        // Prompt stays open so leaves can be added back to back
        assert!(matches!(app.mode, Mode::AddSubtask { .. }));
        // The parent task is revealed
        assert!(app.expanded.contains(&id));
    }

    #[test]
    fn nested_add_closes_the_prompt() {
        let (mut app, _dir) = test_app();
        let id = add_task(&mut app, "root");
        let parent = app.store.add_subtask(&id, "parent").unwrap();
        app.mode = Mode::AddSubtask {
            task_id: id.clone(),
            parent_sub_id: Some(parent.clone()),
        };

        for c in "child".chars() {
            handle_add_subtask(
                &mut app,
                key(KeyCode::Char(c)),
                id.clone(),
                Some(parent.clone()),
            );
        }
        handle_add_subtask(&mut app, key(KeyCode::Enter), id.clone(), Some(parent.clone()));

        let sub = app.store.find_subtask(&id, &parent).unwrap();
        assert_eq!(sub.subtasks.len(), 1);
        assert_eq!(sub.subtasks[0].title, "child");
        assert_eq!(app.mode, Mode::Navigate);
    }
}
