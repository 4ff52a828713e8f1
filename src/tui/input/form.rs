use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::Priority;
use crate::ops::store::TaskDraft;
use crate::tui::app::{App, Mode};

use super::common::TextInput;

/// Which add-form field has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Due,
    Priority,
    Tag,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Due,
            FormField::Due => FormField::Priority,
            FormField::Priority => FormField::Tag,
            FormField::Tag => FormField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Tag,
            FormField::Due => FormField::Title,
            FormField::Priority => FormField::Due,
            FormField::Tag => FormField::Priority,
        }
    }
}

/// State of the add-task form overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: TextInput,
    pub due: TextInput,
    pub tag: TextInput,
    pub priority: Priority,
    pub focus: FormField,
}

/// Validation error from the add form
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("task title required")]
    TitleRequired,
    #[error("due date must be YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    BadDueDate,
}

impl TaskForm {
    pub fn clear(&mut self) {
        *self = TaskForm::default();
    }

    /// Assemble a draft from the current fields. Rejects a blank title and
    /// a malformed due date; leaves all fields intact so the user can fix
    /// them.
    pub fn to_draft(&self) -> Result<TaskDraft, FormError> {
        if self.title.is_blank() {
            return Err(FormError::TitleRequired);
        }
        Ok(TaskDraft {
            title: self.title.text().to_string(),
            due: parse_due(self.due.text())?,
            priority: self.priority,
            tag: self.tag.text().trim().to_string(),
        })
    }
}

/// Accepts an empty string (no due date), `YYYY-MM-DD` (start of day) or
/// `YYYY-MM-DD HH:MM`.
pub fn parse_due(input: &str) -> Result<Option<NaiveDateTime>, FormError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(Some(dt));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0))
        .map_err(|_| FormError::BadDueDate)
}

/// Handle a key in the add-task form
pub fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.form.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Tab | KeyCode::Down => app.form.focus = app.form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus = app.form.focus.prev(),
        KeyCode::Enter => submit(app),
        _ => match app.form.focus {
            FormField::Title => {
                app.form.title.handle_key(key);
            }
            FormField::Due => {
                app.form.due.handle_key(key);
            }
            FormField::Tag => {
                app.form.tag.handle_key(key);
            }
            FormField::Priority => {
                if matches!(
                    key.code,
                    KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                ) {
                    app.form.priority = app.form.priority.cycled();
                }
            }
        },
    }
}

fn submit(app: &mut App) {
    let draft = match app.form.to_draft() {
        Ok(draft) => draft,
        // Validation failure: surface it and abort, no state change
        Err(e) => {
            app.error(e.to_string());
            return;
        }
    };
    match app.store.add_task(draft) {
        Ok(_) => {
            app.persist();
            // Fields reset after a successful add
            app.form.clear();
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        Err(e) => app.error(e.to_string()),
    }
}
