use crate::domain::{Quadrant, Task, TaskDraft, TaskPatch};
use crate::persistence::{StoreError, TaskRepository, UserScope};
use chrono::{DateTime, Local};

/// Active and completed tasks, mirrored from a repository.
///
/// Every mutation goes to the repository first; the in-memory lists only
/// change once the repository call succeeded, so a failed call leaves the
/// store exactly as it was.
pub struct TaskStore {
    repo: Box<dyn TaskRepository>,
    scope: UserScope,
    active: Vec<Task>,
    completed: Vec<Task>,
}

impl TaskStore {
    /// Empty store; call `load` to fetch
    pub fn new(repo: Box<dyn TaskRepository>, scope: UserScope) -> Self {
        Self {
            repo,
            scope,
            active: Vec::new(),
            completed: Vec::new(),
        }
    }

    /// Fetch everything for the scope, splitting active from completed
    pub fn load(&mut self) -> Result<(), StoreError> {
        let tasks = self.repo.list(&self.scope)?;
        let (completed, active): (Vec<Task>, Vec<Task>) =
            tasks.into_iter().partition(|t| t.completed);
        self.active = active;
        self.completed = completed;
        Ok(())
    }

    pub fn active(&self) -> &[Task] {
        &self.active
    }

    pub fn completed(&self) -> &[Task] {
        &self.completed
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.active
            .iter()
            .chain(self.completed.iter())
            .find(|t| t.id == id)
    }

    /// Active tasks of one quadrant, in list order
    pub fn in_quadrant(&self, quadrant: Quadrant) -> Vec<&Task> {
        self.active.iter().filter(|t| t.quadrant == quadrant).collect()
    }

    /// Tasks (active or completed) whose id starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Task> {
        self.active
            .iter()
            .chain(self.completed.iter())
            .filter(|t| t.id.starts_with(prefix))
            .collect()
    }

    /// Persist a new task and put it at the top of the active list
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = self.repo.create(&self.scope, draft)?;
        self.active.insert(0, task.clone());
        Ok(task)
    }

    /// Complete an active task. Returns false when the id is not active.
    pub fn complete(&mut self, id: &str, now: DateTime<Local>) -> Result<bool, StoreError> {
        let Some(idx) = self.active.iter().position(|t| t.id == id) else {
            return Ok(false);
        };

        let mut done = self.repo.update(&self.scope, id, &TaskPatch::complete(now))?;
        if !done.completed || done.completed_at.is_none() {
            done.mark_done(now);
        }

        self.active.remove(idx);
        self.completed.insert(0, done);
        Ok(true)
    }

    /// Delete a task from whichever list holds it
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        self.repo.delete(&self.scope, id)?;
        self.active.retain(|t| t.id != id);
        self.completed.retain(|t| t.id != id);
        Ok(true)
    }

    /// Reassign an active task to another quadrant. Moving to the quadrant
    /// it is already in is a no-op.
    pub fn move_to(&mut self, id: &str, quadrant: Quadrant) -> Result<bool, StoreError> {
        let Some(idx) = self.active.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        if self.active[idx].quadrant == quadrant {
            return Ok(false);
        }

        self.repo.update(&self.scope, id, &TaskPatch::move_to(quadrant))?;
        self.active[idx].quadrant = quadrant;
        Ok(true)
    }

    /// Delete every completed task. Returns how many were removed.
    pub fn clear_history(&mut self) -> Result<usize, StoreError> {
        if self.completed.is_empty() {
            return Ok(0);
        }
        self.repo.delete_completed(&self.scope)?;
        let removed = self.completed.len();
        self.completed.clear();
        Ok(removed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::persistence::MemoryRepository;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Memory repository whose calls can be switched to fail
    pub(crate) struct FlakyRepository {
        inner: MemoryRepository,
        failing: Rc<Cell<bool>>,
    }

    impl FlakyRepository {
        pub(crate) fn new() -> (Self, Rc<Cell<bool>>) {
            let failing = Rc::new(Cell::new(false));
            let repo = Self {
                inner: MemoryRepository::new(),
                failing: failing.clone(),
            };
            (repo, failing)
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.failing.get() {
                return Err(StoreError::Write {
                    path: "flaky.json".into(),
                    message: "disk full".to_string(),
                });
            }
            Ok(())
        }
    }

    impl TaskRepository for FlakyRepository {
        fn list(&mut self, scope: &UserScope) -> Result<Vec<Task>, StoreError> {
            self.check()?;
            self.inner.list(scope)
        }
        fn create(&mut self, scope: &UserScope, draft: TaskDraft) -> Result<Task, StoreError> {
            self.check()?;
            self.inner.create(scope, draft)
        }
        fn update(&mut self, scope: &UserScope, id: &str, patch: &TaskPatch) -> Result<Task, StoreError> {
            self.check()?;
            self.inner.update(scope, id, patch)
        }
        fn delete(&mut self, scope: &UserScope, id: &str) -> Result<(), StoreError> {
            self.check()?;
            self.inner.delete(scope, id)
        }
    }

    fn store() -> TaskStore {
        TaskStore::new(Box::new(MemoryRepository::new()), UserScope::default())
    }

    fn add(store: &mut TaskStore, title: &str, quadrant: Quadrant) -> Task {
        store
            .create(TaskDraft::new(title, "", None, quadrant).unwrap())
            .unwrap()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_create_prepends() {
        let mut store = store();
        add(&mut store, "First", Quadrant::Today);
        add(&mut store, "Second", Quadrant::Today);
        assert_eq!(titles(store.active()), vec!["Second", "First"]);
    }

    #[test]
    fn test_complete_moves_task_exactly_once() {
        let mut store = store();
        let task = add(&mut store, "Ship spec", Quadrant::Immediate);
        let now = Local::now();

        assert!(store.complete(&task.id, now).unwrap());
        assert!(store.active().is_empty());
        assert_eq!(store.completed().len(), 1);
        assert!(store.completed()[0].completed);
        assert_eq!(store.completed()[0].completed_at, Some(now));

        // A second completion is a no-op
        assert!(!store.complete(&task.id, now).unwrap());
        assert_eq!(store.completed().len(), 1);
    }

    #[test]
    fn test_completed_are_prepended() {
        let mut store = store();
        let a = add(&mut store, "A", Quadrant::Today);
        let b = add(&mut store, "B", Quadrant::Today);
        store.complete(&a.id, Local::now()).unwrap();
        store.complete(&b.id, Local::now()).unwrap();
        assert_eq!(titles(store.completed()), vec!["B", "A"]);
    }

    #[test]
    fn test_move_reassigns_quadrant() {
        let mut store = store();
        let task = add(&mut store, "Plan", Quadrant::Week);
        assert!(store.move_to(&task.id, Quadrant::Month).unwrap());
        assert_eq!(store.get(&task.id).unwrap().quadrant, Quadrant::Month);
        assert!(store.in_quadrant(Quadrant::Week).is_empty());
        assert_eq!(store.in_quadrant(Quadrant::Month).len(), 1);
        assert!(!store.move_to(&task.id, Quadrant::Month).unwrap());
    }

    #[test]
    fn test_delete_and_unknown_ids() {
        let mut store = store();
        let task = add(&mut store, "Tmp", Quadrant::Today);
        assert!(!store.delete("missing").unwrap());
        assert!(store.delete(&task.id).unwrap());
        assert!(store.active().is_empty());
    }

    #[test]
    fn test_clear_history_leaves_active() {
        let mut store = store();
        for title in ["A", "B", "C"] {
            let task = add(&mut store, title, Quadrant::Today);
            store.complete(&task.id, Local::now()).unwrap();
        }
        add(&mut store, "Open", Quadrant::Month);

        assert_eq!(store.clear_history().unwrap(), 3);
        assert!(store.completed().is_empty());
        assert_eq!(titles(store.active()), vec!["Open"]);
    }

    #[test]
    fn test_load_partitions_completed() {
        let scope = UserScope::default();
        let mut repo = MemoryRepository::new();
        let open = repo
            .create(&scope, TaskDraft::new("Open", "", None, Quadrant::Today).unwrap())
            .unwrap();
        let done = repo
            .create(&scope, TaskDraft::new("Done", "", None, Quadrant::Today).unwrap())
            .unwrap();
        repo.update(&scope, &done.id, &TaskPatch::complete(Local::now())).unwrap();

        let mut store = TaskStore::new(Box::new(repo), scope);
        store.load().unwrap();
        assert_eq!(store.active()[0].id, open.id);
        assert_eq!(store.completed()[0].id, done.id);
    }

    #[test]
    fn test_failures_leave_state_unchanged() {
        let (repo, failing) = FlakyRepository::new();
        let mut store = TaskStore::new(Box::new(repo), UserScope::default());
        let keep = add(&mut store, "Keep", Quadrant::Week);
        let done = add(&mut store, "Done", Quadrant::Today);
        store.complete(&done.id, Local::now()).unwrap();
        let active_before = store.active().to_vec();
        let completed_before = store.completed().to_vec();

        failing.set(true);
        assert!(store.load().is_err());
        assert!(store
            .create(TaskDraft::new("X", "", None, Quadrant::Today).unwrap())
            .is_err());
        assert!(store.complete(&keep.id, Local::now()).is_err());
        assert!(store.move_to(&keep.id, Quadrant::Month).is_err());
        assert!(store.delete(&keep.id).is_err());
        assert!(store.clear_history().is_err());

        assert_eq!(store.active(), active_before.as_slice());
        assert_eq!(store.completed(), completed_before.as_slice());
    }

    #[test]
    fn test_find_by_prefix() {
        let mut store = store();
        let task = add(&mut store, "Find me", Quadrant::Today);
        let found = store.find_by_prefix(&task.id[..6]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, task.id);
        assert!(store.find_by_prefix("zzzz-not-an-id").is_empty());
    }
}
