use chrono::NaiveDateTime;
use rand::Rng;

use crate::model::task::{Priority, Subtask, Task};

/// Maximum nesting depth for subtask trees. Direct children of a task sit at
/// depth 1; an add that would place a node deeper than this is rejected.
pub const MAX_SUBTASK_DEPTH: usize = 8;

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("task title required")]
    TitleRequired,
    #[error("cannot nest deeper: maximum depth ({MAX_SUBTASK_DEPTH}) reached")]
    MaxDepthReached,
}

/// Fields for a new top-level task, as collected by the add form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub due: Option<NaiveDateTime>,
    pub priority: Priority,
    pub tag: String,
}

/// The in-memory task collection. Owns every task for the lifetime of the
/// session; all mutation goes through its methods. Order is manual order,
/// as shaped by adds and swaps.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore { tasks: Vec::new() }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        TaskStore { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // -----------------------------------------------------------------------
    // Top-level task operations
    // -----------------------------------------------------------------------

    /// Add a task from the draft, appended at the end of the collection.
    /// Returns the assigned id. The title must be non-blank after trimming.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<String, StoreError> {
        let title = normalized_title(&draft.title)?;
        let id = generate_id("t");
        let mut task = Task::new(id.clone(), title);
        task.due = draft.due;
        task.priority = draft.priority;
        task.tag = draft.tag.trim().to_string();
        self.tasks.push(task);
        Ok(id)
    }

    /// Remove a task (with its whole subtask tree). Other tasks keep their
    /// order. Returns the removed task.
    pub fn remove_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.tasks.remove(idx))
    }

    /// Apply a mutation to the task with the given id.
    pub fn update_task<F>(&mut self, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Task),
    {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        f(task);
        Ok(())
    }

    pub fn edit_title(&mut self, id: &str, new_title: &str) -> Result<(), StoreError> {
        let title = normalized_title(new_title)?;
        self.update_task(id, |t| t.title = title)
    }

    /// Flip completion; returns the new value. A parent's flag never
    /// propagates to its children or vice versa.
    pub fn toggle_completed(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut completed = false;
        self.update_task(id, |t| {
            t.completed = !t.completed;
            completed = t.completed;
        })?;
        Ok(completed)
    }

    /// Exchange the positions of two top-level tasks. This is a positional
    /// swap, not a general move.
    pub fn swap_tasks(&mut self, id_a: &str, id_b: &str) -> Result<(), StoreError> {
        let a = self
            .tasks
            .iter()
            .position(|t| t.id == id_a)
            .ok_or_else(|| StoreError::NotFound(id_a.to_string()))?;
        let b = self
            .tasks
            .iter()
            .position(|t| t.id == id_b)
            .ok_or_else(|| StoreError::NotFound(id_b.to_string()))?;
        self.tasks.swap(a, b);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Subtask tree operations
    //
    // Every lookup is a recursive depth-first search from the named task's
    // direct children, so a node anywhere in the tree can be targeted.
    // -----------------------------------------------------------------------

    /// Append a leaf subtask directly under a top-level task.
    /// Returns the assigned id.
    pub fn add_subtask(&mut self, task_id: &str, title: &str) -> Result<String, StoreError> {
        let title = normalized_title(title)?;
        let id = generate_id("s");
        let sub = Subtask::new(id.clone(), title);
        self.update_task(task_id, |t| t.subtasks.push(sub))?;
        Ok(id)
    }

    /// Append a child under the subtask `parent_sub_id`, located anywhere in
    /// the named task's tree. Fails when the child would exceed the depth cap.
    pub fn add_nested_subtask(
        &mut self,
        task_id: &str,
        parent_sub_id: &str,
        title: &str,
    ) -> Result<String, StoreError> {
        let title = normalized_title(title)?;
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound(task_id.to_string()))?;
        let (parent, depth) = find_subtask_mut(&mut task.subtasks, parent_sub_id, 1)
            .ok_or_else(|| StoreError::NotFound(parent_sub_id.to_string()))?;
        if depth + 1 > MAX_SUBTASK_DEPTH {
            return Err(StoreError::MaxDepthReached);
        }
        let id = generate_id("s");
        parent.subtasks.push(Subtask::new(id.clone(), title));
        Ok(id)
    }

    /// Apply a mutation to a subtask anywhere in the named task's tree.
    pub fn update_subtask<F>(&mut self, task_id: &str, sub_id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Subtask),
    {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound(task_id.to_string()))?;
        let (sub, _) = find_subtask_mut(&mut task.subtasks, sub_id, 1)
            .ok_or_else(|| StoreError::NotFound(sub_id.to_string()))?;
        f(sub);
        Ok(())
    }

    /// Flip a subtask's completion; returns the new value.
    pub fn toggle_subtask(&mut self, task_id: &str, sub_id: &str) -> Result<bool, StoreError> {
        let mut completed = false;
        self.update_subtask(task_id, sub_id, |s| {
            s.completed = !s.completed;
            completed = s.completed;
        })?;
        Ok(completed)
    }

    pub fn edit_subtask_title(
        &mut self,
        task_id: &str,
        sub_id: &str,
        new_title: &str,
    ) -> Result<(), StoreError> {
        let title = normalized_title(new_title)?;
        self.update_subtask(task_id, sub_id, |s| s.title = title)
    }

    /// Remove a subtask (with its subtree) from anywhere in the named task's
    /// tree. Returns the removed node.
    pub fn remove_subtask(&mut self, task_id: &str, sub_id: &str) -> Result<Subtask, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound(task_id.to_string()))?;
        remove_subtask_in(&mut task.subtasks, sub_id)
            .ok_or_else(|| StoreError::NotFound(sub_id.to_string()))
    }

    /// Exchange the positions of two sibling subtasks anywhere in the named
    /// task's tree. The pair must share a parent list; swapping nodes across
    /// branches has no sensible meaning.
    pub fn swap_subtasks(
        &mut self,
        task_id: &str,
        id_a: &str,
        id_b: &str,
    ) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound(task_id.to_string()))?;
        if swap_siblings_in(&mut task.subtasks, id_a, id_b) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("{id_a} and {id_b} as siblings")))
        }
    }

    /// Find a subtask anywhere in the named task's tree.
    pub fn find_subtask(&self, task_id: &str, sub_id: &str) -> Option<&Subtask> {
        let task = self.task(task_id)?;
        find_subtask_in(&task.subtasks, sub_id)
    }
}

fn normalized_title(title: &str) -> Result<String, StoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::TitleRequired);
    }
    Ok(trimmed.to_string())
}

/// Opaque id: a prefix plus random base-36 characters.
fn generate_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| char::from_digit(rng.gen_range(0..36u32), 36).unwrap_or('0'))
        .collect();
    format!("{prefix}-{suffix}")
}

/// Depth-first search for a subtask, tracking its depth. Direct children of
/// a task are at depth 1.
fn find_subtask_mut<'a>(
    subtasks: &'a mut [Subtask],
    sub_id: &str,
    depth: usize,
) -> Option<(&'a mut Subtask, usize)> {
    for sub in subtasks.iter_mut() {
        if sub.id == sub_id {
            return Some((sub, depth));
        }
        if let Some(found) = find_subtask_mut(&mut sub.subtasks, sub_id, depth + 1) {
            return Some(found);
        }
    }
    None
}

fn find_subtask_in<'a>(subtasks: &'a [Subtask], sub_id: &str) -> Option<&'a Subtask> {
    for sub in subtasks {
        if sub.id == sub_id {
            return Some(sub);
        }
        if let Some(found) = find_subtask_in(&sub.subtasks, sub_id) {
            return Some(found);
        }
    }
    None
}

fn swap_siblings_in(subtasks: &mut [Subtask], id_a: &str, id_b: &str) -> bool {
    let a = subtasks.iter().position(|s| s.id == id_a);
    let b = subtasks.iter().position(|s| s.id == id_b);
    if let (Some(a), Some(b)) = (a, b) {
        subtasks.swap(a, b);
        return true;
    }
    for sub in subtasks.iter_mut() {
        if swap_siblings_in(&mut sub.subtasks, id_a, id_b) {
            return true;
        }
    }
    false
}

fn remove_subtask_in(subtasks: &mut Vec<Subtask>, sub_id: &str) -> Option<Subtask> {
    if let Some(idx) = subtasks.iter().position(|s| s.id == sub_id) {
        return Some(subtasks.remove(idx));
    }
    for sub in subtasks.iter_mut() {
        if let Some(removed) = remove_subtask_in(&mut sub.subtasks, sub_id) {
            return Some(removed);
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        }
    }

    fn store_with(titles: &[&str]) -> (TaskStore, Vec<String>) {
        let mut store = TaskStore::new();
        let ids = titles
            .iter()
            .map(|t| store.add_task(draft(t)).unwrap())
            .collect();
        (store, ids)
    }

    // --- Top-level task operations ---

    #[test]
    fn add_then_lookup_yields_fresh_task() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("Buy milk")).unwrap();

        let task = store.task(&id).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn add_trims_title_and_tag() {
        let mut store = TaskStore::new();
        let id = store
            .add_task(TaskDraft {
                title: "  padded  ".into(),
                tag: " home ".into(),
                ..TaskDraft::default()
            })
            .unwrap();
        let task = store.task(&id).unwrap();
        assert_eq!(task.title, "padded");
        assert_eq!(task.tag, "home");
    }

    #[test]
    fn add_rejects_blank_title() {
        let mut store = TaskStore::new();
        assert!(matches!(
            store.add_task(draft("   ")),
            Err(StoreError::TitleRequired)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let (store, ids) = store_with(&["a", "b", "c", "d"]);
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), store.len());
        for id in &ids {
            assert!(id.starts_with("t-"));
        }
    }

    #[test]
    fn remove_leaves_other_tasks_untouched() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        let removed = store.remove_task(&ids[1]).unwrap();
        assert_eq!(removed.title, "b");
        assert!(store.task(&ids[1]).is_none());

        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[test]
    fn remove_missing_id_reports_not_found() {
        let (mut store, _) = store_with(&["a"]);
        assert!(matches!(
            store.remove_task("t-missing"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn toggle_twice_restores_original_value() {
        let (mut store, ids) = store_with(&["a"]);
        assert!(store.toggle_completed(&ids[0]).unwrap());
        assert!(!store.toggle_completed(&ids[0]).unwrap());
        assert!(!store.task(&ids[0]).unwrap().completed);
    }

    #[test]
    fn edit_title_replaces_text() {
        let (mut store, ids) = store_with(&["old"]);
        store.edit_title(&ids[0], "new").unwrap();
        assert_eq!(store.task(&ids[0]).unwrap().title, "new");
    }

    #[test]
    fn edit_title_rejects_blank() {
        let (mut store, ids) = store_with(&["old"]);
        assert!(matches!(
            store.edit_title(&ids[0], "  "),
            Err(StoreError::TitleRequired)
        ));
        assert_eq!(store.task(&ids[0]).unwrap().title, "old");
    }

    #[test]
    fn swap_exchanges_positions() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.swap_tasks(&ids[0], &ids[2]).unwrap();
        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["c", "b", "a"]);
    }

    #[test]
    fn swap_requires_both_ids() {
        let (mut store, ids) = store_with(&["a", "b"]);
        assert!(matches!(
            store.swap_tasks(&ids[0], "t-missing"),
            Err(StoreError::NotFound(_))
        ));
        // Order unchanged on failure
        let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    // --- Subtask tree operations ---

    #[test]
    fn subtask_scenario_progress_and_independence() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("Buy milk")).unwrap();
        assert_eq!(store.len(), 1);

        let sub_id = store.add_subtask(&id, "2% milk").unwrap();
        let task = store.task(&id).unwrap();
        assert_eq!(task.subtasks.len(), 1);
        assert_eq!(task.progress().percent(), 0);

        assert!(store.toggle_subtask(&id, &sub_id).unwrap());
        let task = store.task(&id).unwrap();
        assert_eq!(task.progress().percent(), 100);
        // The parent's own flag is independent of its children
        assert!(!task.completed);
    }

    #[test]
    fn nested_add_targets_node_anywhere_in_tree() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();
        let a = store.add_subtask(&id, "a").unwrap();
        let b = store.add_nested_subtask(&id, &a, "b").unwrap();
        let c = store.add_nested_subtask(&id, &b, "c").unwrap();

        // c hangs off b, which hangs off a
        let found = store.find_subtask(&id, &c).unwrap();
        assert_eq!(found.title, "c");
        let task = store.task(&id).unwrap();
        assert_eq!(task.subtasks[0].subtasks[0].subtasks[0].id, c);
    }

    #[test]
    fn nested_add_respects_depth_cap() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();
        let mut parent = store.add_subtask(&id, "level 1").unwrap();
        for level in 2..=MAX_SUBTASK_DEPTH {
            parent = store
                .add_nested_subtask(&id, &parent, &format!("level {level}"))
                .unwrap();
        }
        assert!(matches!(
            store.add_nested_subtask(&id, &parent, "too deep"),
            Err(StoreError::MaxDepthReached)
        ));
    }

    #[test]
    fn toggle_and_edit_reach_deep_nodes() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();
        let a = store.add_subtask(&id, "a").unwrap();
        let b = store.add_nested_subtask(&id, &a, "b").unwrap();

        assert!(store.toggle_subtask(&id, &b).unwrap());
        store.edit_subtask_title(&id, &b, "b renamed").unwrap();

        let sub = store.find_subtask(&id, &b).unwrap();
        assert!(sub.completed);
        assert_eq!(sub.title, "b renamed");
    }

    #[test]
    fn remove_subtask_takes_its_subtree() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();
        let a = store.add_subtask(&id, "a").unwrap();
        let b = store.add_nested_subtask(&id, &a, "b").unwrap();
        store.add_nested_subtask(&id, &b, "c").unwrap();

        let removed = store.remove_subtask(&id, &b).unwrap();
        assert_eq!(removed.subtasks.len(), 1);
        assert!(store.find_subtask(&id, &b).is_none());
        // a survives, childless
        assert!(store.find_subtask(&id, &a).unwrap().subtasks.is_empty());
    }

    #[test]
    fn subtask_ops_report_not_found() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();

        assert!(matches!(
            store.toggle_subtask(&id, "s-missing"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.toggle_subtask("t-missing", "s-x"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.remove_subtask(&id, "s-missing"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.add_nested_subtask(&id, "s-missing", "x"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn sibling_subtasks_swap_positions() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();
        let parent = store.add_subtask(&id, "parent").unwrap();
        let a = store.add_nested_subtask(&id, &parent, "a").unwrap();
        let b = store.add_nested_subtask(&id, &parent, "b").unwrap();

        store.swap_subtasks(&id, &a, &b).unwrap();
        let parent = store.find_subtask(&id, &parent).unwrap();
        assert_eq!(parent.subtasks[0].id, b);
        assert_eq!(parent.subtasks[1].id, a);
    }

    #[test]
    fn non_sibling_subtasks_refuse_to_swap() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();
        let a = store.add_subtask(&id, "a").unwrap();
        let b = store.add_nested_subtask(&id, &a, "b").unwrap();

        assert!(matches!(
            store.swap_subtasks(&id, &a, &b),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn subtask_titles_are_validated_too() {
        let mut store = TaskStore::new();
        let id = store.add_task(draft("root")).unwrap();
        assert!(matches!(
            store.add_subtask(&id, " "),
            Err(StoreError::TitleRequired)
        ));
    }
}
