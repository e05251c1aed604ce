//! In-memory task repository.

use super::{InMemoryTrackingStore, page_bounds};
use crate::tracking::{
    domain::{NewTask, ProjectId, Task, TaskId},
    ports::{Page, Repository, RepositoryError, RepositoryResult, TaskFilter, TaskRepository},
    validation::is_overdue,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: InMemoryTrackingStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: InMemoryTrackingStore) -> Self {
        Self { store }
    }

    fn collect_sorted(&self, keep: impl Fn(&Task) -> bool) -> RepositoryResult<Vec<Task>> {
        let state = self.store.read()?;
        let mut found: Vec<Task> = state.tasks.values().filter(|task| keep(task)).cloned().collect();
        found.sort_by_key(|task| (task.created_at(), task.id()));
        Ok(found)
    }
}

#[async_trait]
impl Repository<Task> for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let state = self.store.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> RepositoryResult<Vec<Task>> {
        let (offset, limit) = page_bounds(page);
        let state = self.store.read()?;
        Ok(state
            .tasks
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: NewTask) -> RepositoryResult<Task> {
        let mut state = self.store.write()?;
        let project_id = draft.project_id();
        if !state.projects.contains_key(&project_id) {
            return Err(RepositoryError::MissingProject(project_id));
        }
        let id = state.next_task_id();
        let task = draft.into_task(id);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.store.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::not_found::<Task>(task.id()));
        }
        if !state.projects.contains_key(&task.project_id()) {
            return Err(RepositoryError::MissingProject(task.project_id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let mut state = self.store.write()?;
        Ok(state.tasks.remove(&id))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_where(&self, filter: &TaskFilter) -> RepositoryResult<Vec<Task>> {
        self.collect_sorted(|task| filter.matches(task))
    }

    async fn count_where(&self, filter: &TaskFilter) -> RepositoryResult<u64> {
        let state = self.store.read()?;
        let count = state.tasks.values().filter(|task| filter.matches(task)).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn search(&self, project_id: ProjectId, query: &str) -> RepositoryResult<Vec<Task>> {
        self.collect_sorted(|task| task.project_id() == project_id && task.matches_query(query))
    }

    async fn close_overdue(&self, now: DateTime<Utc>) -> RepositoryResult<u64> {
        let mut state = self.store.write()?;
        let mut closed = 0_u64;
        for task in state.tasks.values_mut() {
            if is_overdue(task.due_date(), now, task.status()) && task.close_at(now) {
                closed += 1;
            }
        }
        Ok(closed)
    }
}
