//! Service layer for task orchestration and the overdue sweep.

use super::{TrackingError, TrackingResult};
use crate::tracking::{
    domain::{NewTask, ProjectId, Task, TaskId, TaskPatch, TaskStatus},
    ports::{ProjectRepository, RepositoryError, TaskFilter, TaskRepository},
    validation::{ValidationConfig, check_task_description, check_task_title},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
}

impl CreateTaskRequest {
    /// Creates a `TODO` task request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::Todo,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Overrides the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Request payload for a partial update of task details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    patch: TaskPatch,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.patch.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.patch.description = Some(description.into());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.patch.due_date = Some(due_date);
        self
    }
}

/// Task orchestration service.
pub struct TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
    config: ValidationConfig,
}

impl<P, T, C> Clone for TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<P, T, C> TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        projects: Arc<P>,
        tasks: Arc<T>,
        clock: Arc<C>,
        config: ValidationConfig,
    ) -> Self {
        Self {
            projects,
            tasks,
            clock,
            config,
        }
    }

    /// Creates a task under an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::ValidationFailure`] for invalid fields or
    /// [`TrackingError::ProjectNotFound`] when the project does not exist.
    pub async fn create(&self, request: CreateTaskRequest) -> TrackingResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            description,
            due_date,
            status,
        } = request;

        check_task_title(&title, &self.config)?;
        if let Some(text) = description.as_deref() {
            check_task_description(text, &self.config)?;
        }
        self.ensure_project_exists(project_id).await?;

        let mut draft = NewTask::new(project_id, title, &*self.clock).with_status(status);
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        if let Some(date) = due_date {
            draft = draft.with_due_date(date);
        }

        let task = self.tasks.create(draft).await?;
        tracing::info!(
            task_id = %task.id(),
            project_id = %project_id,
            status = %task.status(),
            "task created"
        );
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotFound`] when the task does not exist.
    pub async fn get(&self, id: TaskId) -> TrackingResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Task>(id).into())
    }

    /// Lists the tasks of a project, oldest first, optionally restricted to
    /// one status.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::ProjectNotFound`] when the project does not
    /// exist.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        status: Option<TaskStatus>,
    ) -> TrackingResult<Vec<Task>> {
        self.ensure_project_exists(project_id).await?;
        let mut filter = TaskFilter::new().in_project(project_id);
        if let Some(wanted) = status {
            filter = filter.with_statuses([wanted]);
        }
        Ok(self.tasks.find_where(&filter).await?)
    }

    /// Applies the supplied detail fields to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotFound`] when the task does not exist or
    /// [`TrackingError::ValidationFailure`] for invalid fields.
    pub async fn update_details(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TrackingResult<Task> {
        let mut task = self.get(id).await?;
        let UpdateTaskRequest { patch } = request;

        if let Some(title) = patch.title.as_deref() {
            check_task_title(title, &self.config)?;
        }
        if let Some(text) = patch.description.as_deref() {
            check_task_description(text, &self.config)?;
        }

        if task.apply_patch(patch, &*self.clock) {
            self.tasks.update(&task).await?;
            tracing::info!(task_id = %id, "task details updated");
        }
        Ok(task)
    }

    /// Changes the status of a task.
    ///
    /// Requesting the current status returns the task unchanged without a
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotFound`] when the task does not exist or
    /// [`TrackingError::InvalidStatusTransition`] when the configured policy
    /// forbids the change.
    pub async fn update_status(&self, id: TaskId, status: TaskStatus) -> TrackingResult<Task> {
        let mut task = self.get(id).await?;
        let from = task.status();
        let changed = task.transition_to(status, self.config.transition_policy, &*self.clock)?;
        if changed {
            self.tasks.update(&task).await?;
            tracing::info!(task_id = %id, %from, to = %status, "task status changed");
        }
        Ok(task)
    }

    /// Marks a task as done. Idempotent for tasks that are already done.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_status`].
    pub async fn mark_done(&self, id: TaskId) -> TrackingResult<Task> {
        self.update_status(id, TaskStatus::Done).await
    }

    /// Deletes a task unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotFound`] when the task does not exist.
    pub async fn delete(&self, id: TaskId) -> TrackingResult<Task> {
        let deleted = self
            .tasks
            .delete(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Task>(id))?;
        tracing::info!(task_id = %id, project_id = %deleted.project_id(), "task deleted");
        Ok(deleted)
    }

    /// Counts the tasks of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Repository`] when storage fails.
    pub async fn count_for_project(&self, project_id: ProjectId) -> TrackingResult<u64> {
        let filter = TaskFilter::new().in_project(project_id);
        Ok(self.tasks.count_where(&filter).await?)
    }

    /// Finds tasks of a project whose title or description contains
    /// `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Repository`] when storage fails.
    pub async fn search(&self, project_id: ProjectId, query: &str) -> TrackingResult<Vec<Task>> {
        Ok(self.tasks.search(project_id, query).await?)
    }

    /// Forces every overdue task to `DONE` and returns how many changed.
    ///
    /// This is an administrative batch operation: it bypasses the transition
    /// policy and closes the whole batch in one storage call, so a failure
    /// leaves every task as it was. Running it again immediately returns 0.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Repository`] when storage fails.
    pub async fn autoclose_overdue(&self) -> TrackingResult<u64> {
        let closed = self.tasks.close_overdue(self.clock.utc()).await?;
        tracing::info!(closed, "overdue sweep finished");
        Ok(closed)
    }

    async fn ensure_project_exists(&self, project_id: ProjectId) -> TrackingResult<()> {
        if self.projects.find_by_id(project_id).await?.is_some() {
            return Ok(());
        }
        Err(TrackingError::ProjectNotFound { project_id })
    }
}
