use super::files::{atomic_write, read_file};
use super::repository::{sort_newest_first, StoreError, TaskRecord, TaskRepository, UserScope};
use crate::domain::{generate_id, Task, TaskDraft, TaskPatch};
use chrono::Local;
use std::path::PathBuf;

/// Repository backed by a single JSON file of task records.
///
/// Records of every user live in the same file; each call only sees the
/// rows of its scope. Every mutation rewrites the file atomically.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Vec<TaskRecord>, StoreError> {
        let content = read_file(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            message: format!("{:#}", e),
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, records: &[TaskRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        atomic_write(&self.path, &json).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            message: format!("{:#}", e),
        })
    }
}

impl TaskRepository for JsonFileRepository {
    fn list(&mut self, scope: &UserScope) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self
            .load()?
            .into_iter()
            .filter(|r| r.user_id == scope.as_str())
            .map(TaskRecord::into_task)
            .collect();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    fn create(&mut self, scope: &UserScope, draft: TaskDraft) -> Result<Task, StoreError> {
        let mut records = self.load()?;
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
        records.push(TaskRecord::from_task(&task, scope));
        self.store(&records)?;
        Ok(task)
    }

    fn update(&mut self, scope: &UserScope, id: &str, patch: &TaskPatch) -> Result<Task, StoreError> {
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id && r.user_id == scope.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut task = record.clone().into_task();
        task.apply(patch);
        *record = TaskRecord::from_task(&task, scope);

        self.store(&records)?;
        Ok(task)
    }

    fn delete(&mut self, scope: &UserScope, id: &str) -> Result<(), StoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| !(r.id == id && r.user_id == scope.as_str()));
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.store(&records)
    }

    fn delete_completed(&mut self, scope: &UserScope) -> Result<usize, StoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| !(r.completed && r.user_id == scope.as_str()));
        let removed = before - records.len();
        if removed > 0 {
            self.store(&records)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quadrant;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn draft(title: &str, quadrant: Quadrant) -> TaskDraft {
        TaskDraft::new(title, "", None, quadrant).unwrap()
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let dir = tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        assert!(repo.list(&UserScope::default()).unwrap().is_empty());
    }

    #[test]
    fn test_create_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let scope = UserScope::default();

        let created = JsonFileRepository::new(&path)
            .create(&scope, draft("Ship spec", Quadrant::Immediate))
            .unwrap();

        let listed = JsonFileRepository::new(&path).list(&scope).unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[test]
    fn test_scopes_are_isolated() {
        let dir = tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        let alice = UserScope::new("alice");
        let bob = UserScope::new("bob");

        let task = repo.create(&alice, draft("Alice's", Quadrant::Today)).unwrap();
        assert!(repo.list(&bob).unwrap().is_empty());
        assert!(matches!(
            repo.delete(&bob, &task.id),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(repo.list(&alice).unwrap().len(), 1);
    }

    #[test]
    fn test_update_moves_and_completes() {
        let dir = tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        let scope = UserScope::default();
        let task = repo.create(&scope, draft("Plan", Quadrant::Week)).unwrap();

        let moved = repo.update(&scope, &task.id, &TaskPatch::move_to(Quadrant::Month)).unwrap();
        assert_eq!(moved.quadrant, Quadrant::Month);

        let now = Local::now();
        let done = repo.update(&scope, &task.id, &TaskPatch::complete(now)).unwrap();
        assert!(done.completed);
        assert_eq!(done.completed_at, Some(now));

        let listed = repo.list(&scope).unwrap();
        assert_eq!(listed[0].quadrant, Quadrant::Month);
        assert!(listed[0].completed);
    }

    #[test]
    fn test_update_unknown_id() {
        let dir = tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        let result = repo.update(&UserScope::default(), "nope", &TaskPatch::move_to(Quadrant::Today));
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_delete_completed_only_touches_scope() {
        let dir = tempdir().unwrap();
        let mut repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        let me = UserScope::default();
        let other = UserScope::new("other");

        let a = repo.create(&me, draft("A", Quadrant::Today)).unwrap();
        repo.create(&me, draft("B", Quadrant::Today)).unwrap();
        let c = repo.create(&other, draft("C", Quadrant::Today)).unwrap();
        repo.update(&me, &a.id, &TaskPatch::complete(Local::now())).unwrap();
        repo.update(&other, &c.id, &TaskPatch::complete(Local::now())).unwrap();

        assert_eq!(repo.delete_completed(&me).unwrap(), 1);
        let mine: Vec<String> = repo.list(&me).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(mine, vec!["B".to_string()]);
        assert_eq!(repo.list(&other).unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();
        let mut repo = JsonFileRepository::new(&path);
        assert!(matches!(
            repo.list(&UserScope::default()),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
