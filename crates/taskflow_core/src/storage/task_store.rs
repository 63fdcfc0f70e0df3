use crate::model::Task;
use crate::storage::kv_store::KeyValueStore;
use log::warn;

pub const TASKS_KEY: &str = "taskTrackerTasks";
pub const USER_KEY: &str = "taskTrackerUser";

/// The collection returned when the stored value is absent or unusable.
pub fn default_tasks() -> Vec<Task> {
    Vec::new()
}

/// Reads the stored collection. Never fails the caller: an absent value
/// seeds the store with the default collection; an unreadable or malformed
/// value degrades to the default without overwriting whatever is stored.
/// A healthy parse is returned verbatim, with no per-field validation.
pub fn load_tasks(store: &mut dyn KeyValueStore) -> Vec<Task> {
    let stored = match store.get(TASKS_KEY) {
        Ok(value) => value,
        Err(err) => {
            warn!("failed to read task store: {err}");
            return default_tasks();
        }
    };

    let Some(raw) = stored else {
        let seeded = default_tasks();
        save_tasks(store, &seeded);
        return seeded;
    };

    match serde_json::from_str(&raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("stored tasks are unreadable, starting fresh: {err}");
            default_tasks()
        }
    }
}

/// Serializes the full collection and overwrites the stored value. Write
/// faults are logged and swallowed; the in-memory collection stays
/// authoritative either way.
pub fn save_tasks(store: &mut dyn KeyValueStore, tasks: &[Task]) {
    let serialized = match serde_json::to_string(tasks) {
        Ok(value) => value,
        Err(err) => {
            warn!("failed to serialize tasks: {err}");
            return;
        }
    };

    if let Err(err) = store.set(TASKS_KEY, &serialized) {
        warn!("failed to write task store: {err}");
    }
}

/// Removes the stored collection. Only used for explicit reset.
pub fn clear_tasks(store: &mut dyn KeyValueStore) {
    if let Err(err) = store.remove(TASKS_KEY) {
        warn!("failed to clear task store: {err}");
    }
}

pub fn load_user(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(USER_KEY) {
        Ok(value) => value,
        Err(err) => {
            warn!("failed to read stored user: {err}");
            None
        }
    }
}

pub fn save_user(store: &mut dyn KeyValueStore, name: &str) {
    if let Err(err) = store.set(USER_KEY, name) {
        warn!("failed to write stored user: {err}");
    }
}

pub fn clear_user(store: &mut dyn KeyValueStore) {
    if let Err(err) = store.remove(USER_KEY) {
        warn!("failed to clear stored user: {err}");
    }
}
