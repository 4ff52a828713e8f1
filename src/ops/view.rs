use crate::model::task::Task;

/// Sort key for the task view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Manual order, as shaped by adds and swap-reorders
    #[default]
    None,
    Due,
    Priority,
}

impl SortKey {
    pub fn cycled(self) -> Self {
        match self {
            SortKey::None => SortKey::Due,
            SortKey::Due => SortKey::Priority,
            SortKey::Priority => SortKey::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::None => "manual",
            SortKey::Due => "due",
            SortKey::Priority => "priority",
        }
    }
}

/// Filter and sort options for building a view
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    /// Case-insensitive substring match against top-level titles only
    pub query: String,
    pub show_completed: bool,
    pub sort: SortKey,
}

/// Derive the presentation-ready projection of the collection: filtered,
/// then stably sorted. The source is never mutated. Filtering and sorting
/// apply to top-level tasks only; subtask trees render in full, in stored
/// order.
pub fn build_view<'a>(tasks: &'a [Task], filter: &ViewFilter) -> Vec<&'a Task> {
    let query = filter.query.to_lowercase();
    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| query.is_empty() || t.title.to_lowercase().contains(&query))
        .filter(|t| filter.show_completed || !t.completed)
        .collect();

    match filter.sort {
        SortKey::None => {}
        // Tasks without a due date always sort after dated ones
        SortKey::Due => view.sort_by_key(|t| (t.due.is_none(), t.due)),
        SortKey::Priority => view.sort_by_key(|t| t.priority.rank()),
    }
    view
}
