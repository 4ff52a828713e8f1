use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Handle a key in search mode. The query applies live on every edit;
/// Enter keeps it, Esc clears it.
pub fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Esc => {
            app.input.clear();
            app.filter.query.clear();
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        _ => {
            if app.input.handle_key(key) {
                app.filter.query = app.input.text().to_string();
                app.clamp_cursor();
            }
        }
    }
}
