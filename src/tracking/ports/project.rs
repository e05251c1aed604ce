//! Project-specific repository capabilities.

use super::{Repository, RepositoryResult};
use crate::tracking::domain::{Project, ProjectId};
use async_trait::async_trait;

/// Outcome of [`ProjectRepository::delete_if_idle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRemoval {
    /// The project and its finished tasks were deleted.
    Removed(Project),
    /// No project has the requested identifier.
    Missing,
    /// The project still owns open work and was left in place.
    Blocked {
        /// Number of `TODO`/`DOING` tasks found.
        active_tasks: u64,
    },
}

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Repository<Project> {
    /// Finds the project with exactly this title (case-sensitive).
    ///
    /// Returns `None` when no project uses the title.
    async fn find_by_title(&self, title: &str) -> RepositoryResult<Option<Project>>;

    /// Returns projects whose title or description contains `query`,
    /// ignoring case, in identifier order.
    async fn search(&self, query: &str) -> RepositoryResult<Vec<Project>>;

    /// Deletes the project, cascading to its tasks, unless any of its tasks
    /// is still `TODO` or `DOING`.
    ///
    /// The active-task count and the delete happen in one unit of work, so
    /// a task added concurrently cannot slip past the check.
    async fn delete_if_idle(&self, id: ProjectId) -> RepositoryResult<ProjectRemoval>;
}
