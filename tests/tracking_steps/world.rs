//! Shared world state for project and task tracking BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::tracking::{
    adapters::memory::{InMemoryProjectRepository, InMemoryTaskRepository, InMemoryTrackingStore},
    domain::{Project, Task},
    services::{ProjectService, TaskService, TrackingError},
    validation::ValidationConfig,
};

/// Project service type used by the BDD world.
pub type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskService<InMemoryProjectRepository, InMemoryTaskRepository, DefaultClock>;

/// Scenario world for tracking behaviour tests.
pub struct TrackingWorld {
    pub projects: TestProjectService,
    pub tasks: TestTaskService,
    pub last_project: Option<Project>,
    pub last_task: Option<Task>,
    pub last_failure: Option<TrackingError>,
    pub closed_by_sweep: Option<u64>,
}

impl TrackingWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryTrackingStore::new();
        let project_repo = Arc::new(store.projects());
        let task_repo = Arc::new(store.tasks());
        let clock = Arc::new(DefaultClock);
        let config = ValidationConfig::default();

        Self {
            projects: ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock), config),
            tasks: TaskService::new(project_repo, task_repo, clock, config),
            last_project: None,
            last_task: None,
            last_failure: None,
            closed_by_sweep: None,
        }
    }
}

impl Default for TrackingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TrackingWorld {
    TrackingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
