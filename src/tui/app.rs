use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::{prefs_io, store_io};
use crate::model::prefs::Prefs;
use crate::model::task::Subtask;
use crate::ops::store::TaskStore;
use crate::ops::view::{ViewFilter, build_view};

use super::input;
use super::input::common::TextInput;
use super::input::form::TaskForm;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Add-task form overlay
    AddTask,
    /// Single-line title prompt over an existing node
    EditTitle(EditTarget),
    /// Single-line title prompt for a new subtask
    AddSubtask {
        task_id: String,
        /// When set, the new node nests under this subtask
        parent_sub_id: Option<String>,
    },
    /// Live query editing in the status row
    Search,
    /// Delete confirmation
    Confirm(ConfirmAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Task(String),
    Subtask { task_id: String, sub_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(String),
    DeleteSubtask { task_id: String, sub_id: String },
}

/// One visible row of the flattened task tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub node: RowNode,
    /// Nesting level: 0 for top-level tasks, 1 for their direct subtasks
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowNode {
    Task { id: String },
    Subtask { task_id: String, sub_id: String },
}

/// Transient status-row message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub error: bool,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub data_dir: PathBuf,
    pub prefs: Prefs,
    pub theme: Theme,
    pub filter: ViewFilter,
    pub mode: Mode,
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Task ids whose subtask tree is expanded. Session-only presentation
    /// state; collapses again on the next launch.
    pub expanded: HashSet<String>,
    /// Id of the task currently picked up for reordering
    pub carrying: Option<String>,
    /// Shared buffer for the single-line prompt modes
    pub input: TextInput,
    pub form: TaskForm,
    pub notice: Option<Notice>,
    /// Set once a save fails; the session keeps running in memory only
    pub persist_warning: bool,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, data_dir: PathBuf, prefs: Prefs) -> Self {
        let theme = Theme::for_mode(prefs.theme);
        App {
            store,
            data_dir,
            prefs,
            theme,
            filter: ViewFilter::default(),
            mode: Mode::Navigate,
            cursor: 0,
            scroll_offset: 0,
            expanded: HashSet::new(),
            carrying: None,
            input: TextInput::default(),
            form: TaskForm::default(),
            notice: None,
            persist_warning: false,
            show_help: false,
            should_quit: false,
        }
    }

    /// Flatten the filtered view plus expanded subtask trees into the visible
    /// row list. Subtasks are never filtered or sorted; an expanded task shows
    /// its whole tree in stored order.
    pub fn rows(&self) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        for task in build_view(self.store.tasks(), &self.filter) {
            rows.push(FlatRow {
                node: RowNode::Task {
                    id: task.id.clone(),
                },
                depth: 0,
            });
            if self.expanded.contains(&task.id) {
                push_subtask_rows(&mut rows, &task.id, &task.subtasks, 1);
            }
        }
        rows
    }

    pub fn cursor_row(&self) -> Option<FlatRow> {
        self.rows().into_iter().nth(self.cursor)
    }

    /// Keep the cursor inside the visible row list after mutations
    pub fn clamp_cursor(&mut self) {
        let count = self.rows().len();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
    }

    pub fn toggle_expanded(&mut self, task_id: &str) {
        if !self.expanded.remove(task_id) {
            self.expanded.insert(task_id.to_string());
        }
    }

    /// Persist the collection. A failure flips the session to memory-only
    /// and keeps a standing warning in the status row; it is never fatal.
    pub fn persist(&mut self) {
        if store_io::save_tasks(&self.data_dir, self.store.tasks()).is_err() {
            self.persist_warning = true;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.prefs.theme = self.prefs.theme.toggled();
        self.theme = Theme::for_mode(self.prefs.theme);
        if prefs_io::save_prefs(&self.data_dir, &self.prefs).is_err() {
            self.persist_warning = true;
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            error: true,
        });
    }
}

fn push_subtask_rows(rows: &mut Vec<FlatRow>, task_id: &str, subtasks: &[Subtask], depth: usize) {
    for sub in subtasks {
        rows.push(FlatRow {
            node: RowNode::Subtask {
                task_id: task_id.to_string(),
                sub_id: sub.id.clone(),
            },
            depth,
        });
        push_subtask_rows(rows, task_id, &sub.subtasks, depth + 1);
    }
}

/// Launch the TUI against the given data directory (or the platform default).
pub fn run(data_dir_override: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = store_io::resolve_data_dir(data_dir_override)?;
    let tasks = store_io::load_tasks(&data_dir);
    let prefs = prefs_io::load_prefs(&data_dir);
    let mut app = App::new(TaskStore::from_tasks(tasks), data_dir, prefs);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // The poll timeout keeps the clock readout fresh between key events
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
