use crate::clock::{Clock, format_timestamp, parse_timestamp};
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::model::{Priority, Task};

/// Caller-supplied fields for a new task. Everything except the title is
/// optional; an unspecified priority defaults to medium.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
}

/// Field replacements for an existing task. The outer `None` leaves a field
/// untouched; for the clearable fields an inner `None` clears the value.
/// `id`, `createdAt` and `completed` cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
}

/// Validates the title, stamps id and creation time from the injected
/// capabilities, and inserts the new task at the front of the collection so
/// the default newest-first view matches insertion order.
pub fn create_task(
    tasks: &[Task],
    draft: TaskDraft,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
) -> Result<(Vec<Task>, Task), AppError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(AppError::invalid_input("title is required"));
    }

    let due_date = draft
        .due_date
        .as_deref()
        .map(validated_due_date)
        .transpose()?;

    let id = ids.new_id();
    if tasks.iter().any(|task| task.id == id) {
        return Err(AppError::invalid_data(format!("duplicate task id '{id}'")));
    }

    let task = Task {
        id,
        title: title.to_string(),
        description: draft.description,
        completed: false,
        created_at: format_timestamp(clock.now())?,
        due_date,
        priority: draft.priority.unwrap_or_default(),
        category: draft.category,
    };

    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.push(task.clone());
    next.extend_from_slice(tasks);

    Ok((next, task))
}

/// Replaces only the supplied fields on the matching task. Unknown ids are
/// a NotFound error the caller maps to a no-op or a message.
pub fn update_task(
    tasks: &[Task],
    id: &str,
    patch: &TaskPatch,
) -> Result<(Vec<Task>, Task), AppError> {
    let title = match patch.title.as_deref() {
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(AppError::invalid_input("title is required"));
            }
            Some(trimmed.to_string())
        }
        None => None,
    };

    let due_date = match patch.due_date.as_ref() {
        Some(Some(value)) => Some(Some(validated_due_date(value)?)),
        Some(None) => Some(None),
        None => None,
    };

    let mut next = tasks.to_vec();
    let task = next
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| AppError::not_found(format!("no task with id '{id}'")))?;

    if let Some(title) = title {
        task.title = title;
    }
    if let Some(description) = patch.description.clone() {
        task.description = description;
    }
    if let Some(due_date) = due_date {
        task.due_date = due_date;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(category) = patch.category.clone() {
        task.category = category;
    }

    let updated = task.clone();
    Ok((next, updated))
}

/// Flips `completed` on the matching task and reports the resulting state.
pub fn toggle_task(tasks: &[Task], id: &str) -> Result<(Vec<Task>, bool), AppError> {
    let mut next = tasks.to_vec();
    let task = next
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| AppError::not_found(format!("no task with id '{id}'")))?;

    task.completed = !task.completed;
    let completed = task.completed;

    Ok((next, completed))
}

/// Removes the matching task. An unknown id is a silent no-op; the returned
/// flag reports whether anything was removed.
pub fn delete_task(tasks: &[Task], id: &str) -> (Vec<Task>, bool) {
    let next: Vec<Task> = tasks.iter().filter(|task| task.id != id).cloned().collect();
    let removed = next.len() != tasks.len();
    (next, removed)
}

fn validated_due_date(value: &str) -> Result<String, AppError> {
    if parse_timestamp(value).is_none() {
        return Err(AppError::invalid_input("due date must be RFC3339"));
    }
    Ok(value.to_string())
}
