use crate::domain::{Quadrant, Task, TaskDraft, TaskPatch};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Owner of a set of tasks. Every repository call is scoped to one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserScope(String);

impl UserScope {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self(user_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserScope {
    fn default() -> Self {
        Self::new("local")
    }
}

/// Persistence failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task {0} not found")]
    NotFound(String),

    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("task file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence collaborator. Local and synced variants implement the same
/// four calls; which one backs the store is decided at startup.
pub trait TaskRepository {
    /// All tasks of the user, newest first
    fn list(&mut self, scope: &UserScope) -> Result<Vec<Task>, StoreError>;

    fn create(&mut self, scope: &UserScope, draft: TaskDraft) -> Result<Task, StoreError>;

    /// Apply a partial update and return the stored task
    fn update(&mut self, scope: &UserScope, id: &str, patch: &TaskPatch) -> Result<Task, StoreError>;

    fn delete(&mut self, scope: &UserScope, id: &str) -> Result<(), StoreError>;

    /// Bulk delete of the completed set. Returns how many were removed.
    fn delete_completed(&mut self, scope: &UserScope) -> Result<usize, StoreError> {
        let completed: Vec<String> = self
            .list(scope)?
            .into_iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        for id in &completed {
            self.delete(scope, id)?;
        }
        Ok(completed.len())
    }
}

/// Stored row, using the remote table's column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quadrant: Quadrant,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
    pub user_id: String,
}

impl TaskRecord {
    pub fn from_task(task: &Task, scope: &UserScope) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            links: task.links.clone(),
            image_url: task.image_url.clone(),
            quadrant: task.quadrant,
            completed: task.completed,
            created_at: task.created_at,
            completed_at: task.completed_at,
            user_id: scope.as_str().to_string(),
        }
    }

    /// Convert to a domain task, repairing `completed_at` so that it is
    /// present exactly when the task is completed
    pub fn into_task(self) -> Task {
        let completed_at = if self.completed {
            self.completed_at.or(Some(self.created_at))
        } else {
            None
        };
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            links: self.links,
            image_url: self.image_url.filter(|u| !u.is_empty()),
            quadrant: self.quadrant,
            completed: self.completed,
            created_at: self.created_at,
            completed_at,
        }
    }
}

/// Newest first, keeping insertion order for equal timestamps
pub(crate) fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
