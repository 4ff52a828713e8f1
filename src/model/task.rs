use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high orders before medium before low
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Next priority in form-field cycling order
    pub fn cycled(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

/// A top-level tracked item with its subtask tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub due: Option<NaiveDateTime>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub completed: bool,
    /// Direct children (each may nest further)
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    pub created: DateTime<Utc>,
}

/// A child item under a task or another subtask, recursively nestable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub due: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(id: String, title: String) -> Self {
        Task {
            id,
            title,
            due: None,
            priority: Priority::Medium,
            tag: String::new(),
            completed: false,
            subtasks: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Completion progress over direct subtasks only (grandchildren excluded)
    pub fn progress(&self) -> Progress {
        subtask_progress(&self.subtasks)
    }
}

impl Subtask {
    pub fn new(id: String, title: String) -> Self {
        Subtask {
            id,
            title,
            due: None,
            completed: false,
            subtasks: Vec::new(),
        }
    }
}

/// Completion progress over a node's direct children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Percent complete, rounded to the nearest integer. 0 when childless.
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.done * 100 + self.total / 2) / self.total) as u8
    }
}

/// Progress over a list of direct children
pub fn subtask_progress(subtasks: &[Subtask]) -> Progress {
    Progress {
        done: subtasks.iter().filter(|s| s.completed).count(),
        total: subtasks.len(),
    }
}
