use super::repository::{sort_newest_first, StoreError, TaskRepository, UserScope};
use crate::domain::{generate_id, Task, TaskDraft, TaskPatch};
use chrono::Local;
use std::collections::HashMap;

/// In-process repository, used by `--ephemeral` runs and tests
#[derive(Debug, Default)]
pub struct MemoryRepository {
    rows: HashMap<String, Vec<Task>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed existing tasks for a user
    #[cfg(test)]
    pub fn with_tasks(scope: &UserScope, tasks: Vec<Task>) -> Self {
        let mut repo = Self::new();
        repo.rows.insert(scope.as_str().to_string(), tasks);
        repo
    }

    fn rows_mut(&mut self, scope: &UserScope) -> &mut Vec<Task> {
        self.rows.entry(scope.as_str().to_string()).or_default()
    }
}

impl TaskRepository for MemoryRepository {
    fn list(&mut self, scope: &UserScope) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.rows.get(scope.as_str()).cloned().unwrap_or_default();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    fn create(&mut self, scope: &UserScope, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = Task {
            id: generate_id(),
            title: draft.title,
            description: draft.description,
            links: draft.links,
            image_url: draft.image_url,
            quadrant: draft.quadrant,
            completed: false,
            created_at: Local::now(),
            completed_at: None,
        };
        self.rows_mut(scope).push(task.clone());
        Ok(task)
    }

    fn update(&mut self, scope: &UserScope, id: &str, patch: &TaskPatch) -> Result<Task, StoreError> {
        let task = self
            .rows_mut(scope)
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        task.apply(patch);
        Ok(task.clone())
    }

    fn delete(&mut self, scope: &UserScope, id: &str) -> Result<(), StoreError> {
        let rows = self.rows_mut(scope);
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
