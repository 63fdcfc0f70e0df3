use crate::model::{Priority, Task};
use crate::view::task_overdue;
use serde::Serialize;
use time::OffsetDateTime;

/// Aggregate counters over the full collection (not the filtered view),
/// recomputed from scratch on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    /// Completed share of all tasks as a rounded integer percentage;
    /// 0 for an empty collection.
    pub completion_rate: u8,
    pub high_priority_pending: usize,
}

pub fn task_stats(tasks: &[Task], now: OffsetDateTime) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let pending = total - completed;
    let overdue = tasks.iter().filter(|task| task_overdue(task, now)).count();
    let high_priority_pending = tasks
        .iter()
        .filter(|task| !task.completed && task.priority == Priority::High)
        .count();
    let completion_rate = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u8
    };

    TaskStats {
        total,
        completed,
        pending,
        overdue,
        completion_rate,
        high_priority_pending,
    }
}
