use nest::io::store_io::{load_tasks, save_tasks};
use nest::model::task::Priority;
use nest::ops::store::{TaskDraft, TaskStore};
use nest::ops::view::{SortKey, ViewFilter, build_view};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn draft(title: &str, priority: Priority) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        priority,
        ..TaskDraft::default()
    }
}

/// Reload the store the way a fresh session would
fn reload(dir: &TempDir) -> TaskStore {
    TaskStore::from_tasks(load_tasks(dir.path()))
}

#[test]
fn full_session_round_trip() {
    let dir = TempDir::new().unwrap();

    // First session: build up a small tree and persist after each mutation
    let mut store = TaskStore::new();
    let milk = store.add_task(draft("Buy milk", Priority::High)).unwrap();
    save_tasks(dir.path(), store.tasks()).unwrap();

    let sub = store.add_subtask(&milk, "2% milk").unwrap();
    save_tasks(dir.path(), store.tasks()).unwrap();

    store.toggle_subtask(&milk, &sub).unwrap();
    save_tasks(dir.path(), store.tasks()).unwrap();

    // Second session: everything is back, including tree state
    let store = reload(&dir);
    assert_eq!(store.len(), 1);
    let task = store.task(&milk).unwrap();
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.subtasks.len(), 1);
    assert!(task.subtasks[0].completed);
    assert_eq!(task.progress().percent(), 100);
    assert!(!task.completed);
}

#[test]
fn swap_order_survives_a_reload() {
    let dir = TempDir::new().unwrap();

    let mut store = TaskStore::new();
    let a = store.add_task(draft("A", Priority::Low)).unwrap();
    let b = store.add_task(draft("B", Priority::High)).unwrap();
    store.swap_tasks(&a, &b).unwrap();
    save_tasks(dir.path(), store.tasks()).unwrap();

    let store = reload(&dir);
    let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["B", "A"]);
}

#[test]
fn priority_view_over_a_reloaded_store() {
    let dir = TempDir::new().unwrap();

    let mut store = TaskStore::new();
    store.add_task(draft("A", Priority::Low)).unwrap();
    store.add_task(draft("B", Priority::High)).unwrap();
    save_tasks(dir.path(), store.tasks()).unwrap();

    let store = reload(&dir);
    let filter = ViewFilter {
        show_completed: true,
        sort: SortKey::Priority,
        ..ViewFilter::default()
    };
    let order: Vec<&str> = build_view(store.tasks(), &filter)
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(order, ["B", "A"]);
}

#[test]
fn deep_nesting_round_trips() {
    let dir = TempDir::new().unwrap();

    let mut store = TaskStore::new();
    let root = store.add_task(draft("root", Priority::Medium)).unwrap();
    let mut parent = store.add_subtask(&root, "level 1").unwrap();
    for level in 2..=4 {
        parent = store
            .add_nested_subtask(&root, &parent, &format!("level {level}"))
            .unwrap();
    }
    save_tasks(dir.path(), store.tasks()).unwrap();

    let store = reload(&dir);
    let deepest = store.find_subtask(&root, &parent).unwrap();
    assert_eq!(deepest.title, "level 4");
}

#[test]
fn a_corrupt_collection_starts_empty_and_recovers_on_save() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{{ not json").unwrap();

    let mut store = reload(&dir);
    assert!(store.is_empty());

    store.add_task(draft("fresh start", Priority::Medium)).unwrap();
    save_tasks(dir.path(), store.tasks()).unwrap();
    assert_eq!(reload(&dir).len(), 1);
}

#[test]
fn removal_persists_without_touching_neighbors() {
    let dir = TempDir::new().unwrap();

    let mut store = TaskStore::new();
    store.add_task(draft("keep 1", Priority::Medium)).unwrap();
    let doomed = store.add_task(draft("doomed", Priority::Medium)).unwrap();
    store.add_task(draft("keep 2", Priority::Medium)).unwrap();
    store.remove_task(&doomed).unwrap();
    save_tasks(dir.path(), store.tasks()).unwrap();

    let store = reload(&dir);
    let titles: Vec<&str> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["keep 1", "keep 2"]);
    assert!(store.task(&doomed).is_none());
}
