//! Task-specific repository capabilities and query filters.

use super::{Repository, RepositoryResult};
use crate::tracking::domain::{ProjectId, Task, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Conjunction of optional task predicates.
///
/// An empty filter matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    project_id: Option<ProjectId>,
    statuses: Option<Vec<TaskStatus>>,
    due_before: Option<NaiveDate>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one project.
    #[must_use]
    pub const fn in_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts the filter to the given statuses.
    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Restricts the filter to tasks with a due date strictly before `date`.
    #[must_use]
    pub const fn due_before(mut self, date: NaiveDate) -> Self {
        self.due_before = Some(date);
        self
    }

    /// Returns the project restriction, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the status restriction, if any.
    #[must_use]
    pub fn statuses(&self) -> Option<&[TaskStatus]> {
        self.statuses.as_deref()
    }

    /// Returns the due date bound, if any.
    #[must_use]
    pub const fn due_before_date(&self) -> Option<NaiveDate> {
        self.due_before
    }

    /// Evaluates the filter against a task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let project_matches = self
            .project_id
            .is_none_or(|project_id| task.project_id() == project_id);
        let status_matches = self
            .statuses
            .as_ref()
            .is_none_or(|statuses| statuses.contains(&task.status()));
        let due_matches = self
            .due_before
            .is_none_or(|bound| task.due_date().is_some_and(|due| due < bound));
        project_matches && status_matches && due_matches
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Repository<Task> {
    /// Returns every task matching `filter`, oldest first.
    async fn find_where(&self, filter: &TaskFilter) -> RepositoryResult<Vec<Task>>;

    /// Counts the tasks matching `filter`.
    async fn count_where(&self, filter: &TaskFilter) -> RepositoryResult<u64>;

    /// Returns tasks of `project_id` whose title or description contains
    /// `query`, ignoring case, oldest first.
    async fn search(&self, project_id: ProjectId, query: &str) -> RepositoryResult<Vec<Task>>;

    /// Closes every `TODO`/`DOING` task whose due date falls strictly
    /// before the UTC calendar date of `now`, stamping `updated_at` with
    /// `now`, and returns how many tasks changed.
    ///
    /// The whole batch is one unit of work: on error no task is closed.
    async fn close_overdue(&self, now: DateTime<Utc>) -> RepositoryResult<u64>;
}
