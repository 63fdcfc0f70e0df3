use crate::clock::Clock;
use crate::error::AppError;
use crate::ids::IdGenerator;
use crate::model::Task;
use crate::notify::{Announcer, AnnouncementKind};
use crate::stats::{TaskStats, task_stats};
use crate::storage::kv_store::KeyValueStore;
use crate::storage::task_store;
use crate::task_api::{self, TaskDraft, TaskPatch};
use crate::view::{ViewParams, visible_tasks};

/// Owns the authoritative in-memory collection and the signed-in user.
/// Each mutation runs as a pure collection transform, then writes the result
/// through the persistence gateway and announces the outcome. Derived views
/// never mutate state.
pub struct Session<S: KeyValueStore> {
    store: S,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    announcer: Box<dyn Announcer>,
    user: Option<String>,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> Session<S> {
    /// Hydrates the session from the store. Storage faults degrade to an
    /// empty collection and a signed-out user.
    pub fn open(
        mut store: S,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
        announcer: Box<dyn Announcer>,
    ) -> Self {
        let tasks = task_store::load_tasks(&mut store);
        let user = task_store::load_user(&store);
        Self {
            store,
            clock,
            ids,
            announcer,
            user,
            tasks,
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Remembers a non-empty trimmed display name across restarts.
    pub fn login(&mut self, name: &str) -> Result<(), AppError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("display name is required"));
        }
        task_store::save_user(&mut self.store, trimmed);
        self.user = Some(trimmed.to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        task_store::clear_user(&mut self.store);
        self.user = None;
    }

    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, AppError> {
        let (next, task) =
            task_api::create_task(&self.tasks, draft, self.clock.as_ref(), self.ids.as_ref())?;
        self.commit(next);
        self.announcer.announce(
            "Your new task has been added successfully!",
            AnnouncementKind::Success,
        );
        Ok(task)
    }

    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, AppError> {
        let (next, task) = task_api::update_task(&self.tasks, id, patch)?;
        self.commit(next);
        self.announcer.announce(
            "Your task has been updated successfully!",
            AnnouncementKind::Success,
        );
        Ok(task)
    }

    pub fn toggle(&mut self, id: &str) -> Result<bool, AppError> {
        let (next, completed) = task_api::toggle_task(&self.tasks, id)?;
        self.commit(next);
        if completed {
            self.announcer
                .announce("Great job! Task completed!", AnnouncementKind::Success);
        } else {
            self.announcer
                .announce("Task marked as pending", AnnouncementKind::Info);
        }
        Ok(completed)
    }

    /// Deleting an unknown id is a silent no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let (next, removed) = task_api::delete_task(&self.tasks, id);
        if removed {
            self.commit(next);
            self.announcer
                .announce("The task has been removed.", AnnouncementKind::Warning);
        }
        removed
    }

    pub fn visible(&self, params: &ViewParams) -> Vec<Task> {
        visible_tasks(&self.tasks, params, self.clock.now())
    }

    pub fn stats(&self) -> TaskStats {
        task_stats(&self.tasks, self.clock.now())
    }

    /// Drops the persisted collection and empties the in-memory one.
    pub fn reset(&mut self) {
        task_store::clear_tasks(&mut self.store);
        self.tasks = Vec::new();
    }

    fn commit(&mut self, next: Vec<Task>) {
        self.tasks = next;
        task_store::save_tasks(&mut self.store, &self.tasks);
    }
}
