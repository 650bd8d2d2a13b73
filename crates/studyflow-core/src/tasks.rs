//! One-shot task list.
//!
//! Tasks have no completion state: checking one off removes it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StorageError, ValidationError};
use crate::storage::{keys, JsonStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn load(store: &impl JsonStore) -> Self {
        let tasks = store
            .load(keys::TASKS)
            .ok()
            .flatten()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        Self { tasks }
    }

    pub fn persist(&self, store: &impl JsonStore) -> Result<(), StorageError> {
        store.save(keys::TASKS, &serde_json::json!(self.tasks))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Append a task. Text trimming to empty is a no-op.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.push(Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
        });
        self.tasks.last()
    }

    /// Check a task off, which removes it.
    ///
    /// # Errors
    /// Returns an error when the id is unknown.
    pub fn complete(&mut self, id: Uuid) -> Result<(), ValidationError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(ValidationError::NotFound {
                entity: "task",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
