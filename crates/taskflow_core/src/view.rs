use crate::clock::parse_timestamp;
use crate::error::AppError;
use crate::model::Task;
use std::cmp::Ordering;
use std::str::FromStr;
use time::OffsetDateTime;

/// Completion-status predicate applied to the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
    Overdue,
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            other => Err(AppError::invalid_input(format!("unknown filter '{other}'"))),
        }
    }
}

/// Category predicate. `All` is the wildcard; a named category must match
/// the task's category exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            Self::All
        } else {
            Self::Category(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Priority,
    DueDate,
    Alphabetical,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "priority" => Ok(Self::Priority),
            "due" | "duedate" | "due-date" => Ok(Self::DueDate),
            "alphabetical" => Ok(Self::Alphabetical),
            other => Err(AppError::invalid_input(format!("unknown sort order '{other}'"))),
        }
    }
}

/// The transient view selections that decide what subset of the collection
/// is displayed, and in what order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub filter: StatusFilter,
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

/// True when the task is incomplete and its due date is strictly before
/// `now`. Tasks without a parseable due date are never overdue.
pub fn task_overdue(task: &Task, now: OffsetDateTime) -> bool {
    if task.completed {
        return false;
    }
    due_key(task).is_some_and(|due| due < now)
}

/// Derives the display list: the three predicate filters applied as a
/// conjunction, then a stable sort. The input collection is never mutated.
pub fn visible_tasks(tasks: &[Task], params: &ViewParams, now: OffsetDateTime) -> Vec<Task> {
    let query = params.search.to_lowercase();
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_status(task, params.filter, now))
        .filter(|task| matches_search(task, &query))
        .filter(|task| matches_category(task, &params.category))
        .cloned()
        .collect();
    sort_tasks(&mut visible, params.sort);
    visible
}

fn matches_status(task: &Task, filter: StatusFilter, now: OffsetDateTime) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Completed => task.completed,
        StatusFilter::Pending => !task.completed,
        StatusFilter::Overdue => task_overdue(task, now),
    }
}

fn matches_search(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(query) || task.description.to_lowercase().contains(query)
}

fn matches_category(task: &Task, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Category(name) => task.category.as_deref() == Some(name.as_str()),
    }
}

fn sort_tasks(tasks: &mut [Task], order: SortOrder) {
    match order {
        SortOrder::Newest => tasks.sort_by(|a, b| created_key(b).cmp(&created_key(a))),
        SortOrder::Oldest => tasks.sort_by(|a, b| created_key(a).cmp(&created_key(b))),
        SortOrder::Priority => tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortOrder::DueDate => tasks.sort_by(compare_due_dates),
        SortOrder::Alphabetical => {
            tasks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }
}

/// Undated tasks sort after every dated one, regardless of direction.
fn compare_due_dates(a: &Task, b: &Task) -> Ordering {
    match (due_key(a), due_key(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
    }
}

fn created_key(task: &Task) -> Option<OffsetDateTime> {
    parse_timestamp(&task.created_at)
}

fn due_key(task: &Task) -> Option<OffsetDateTime> {
    task.due_date.as_deref().and_then(parse_timestamp)
}
