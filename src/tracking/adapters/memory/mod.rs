//! In-memory repositories for tests and embedded use.
//!
//! Both repositories share one [`InMemoryTrackingStore`] so that project
//! deletion can cascade to tasks and task creation can check its project,
//! mirroring the relational constraints of the `PostgreSQL` schema.

mod project;
mod task;

pub use project::InMemoryProjectRepository;
pub use task::InMemoryTaskRepository;

use crate::tracking::{
    domain::{Project, ProjectId, Task, TaskId},
    ports::{Page, RepositoryError, RepositoryResult},
};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared state behind the in-memory project and task repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrackingStore {
    state: Arc<RwLock<TrackingState>>,
}

#[derive(Debug, Default)]
struct TrackingState {
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    last_project_id: i64,
    last_task_id: i64,
}

impl TrackingState {
    const fn next_project_id(&mut self) -> ProjectId {
        self.last_project_id += 1;
        ProjectId::new(self.last_project_id)
    }

    const fn next_task_id(&mut self) -> TaskId {
        self.last_task_id += 1;
        TaskId::new(self.last_task_id)
    }
}

impl InMemoryTrackingStore {
    /// Creates an empty store. Identifiers start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a project repository backed by this store.
    #[must_use]
    pub fn projects(&self) -> InMemoryProjectRepository {
        InMemoryProjectRepository::new(self.clone())
    }

    /// Returns a task repository backed by this store.
    #[must_use]
    pub fn tasks(&self) -> InMemoryTaskRepository {
        InMemoryTaskRepository::new(self.clone())
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, TrackingState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, TrackingState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn page_bounds(page: Page) -> (usize, usize) {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    (offset, limit)
}
