//! Task aggregate and its draft and patch forms.

use super::{
    Entity, EntityKind, ProjectId, StatusTransitionError, TaskId, TaskStatus, TransitionPolicy,
    project::contains_ignore_case,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// A task belongs to exactly one project for its entire lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the supplied fields of `patch`, leaving omitted fields
    /// untouched.
    ///
    /// Returns `true` when the patch carried at least one field, in which
    /// case `updated_at` is refreshed.
    pub fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        self.touch(clock);
        true
    }

    /// Moves the task to `next` when `policy` allows it.
    ///
    /// Requesting the current status is a no-op and returns `Ok(false)`
    /// without touching `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTransitionError`] when the policy forbids the move.
    pub fn transition_to(
        &mut self,
        next: TaskStatus,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<bool, StatusTransitionError> {
        if self.status == next {
            return Ok(false);
        }
        if !self.status.can_transition_to(next, policy) {
            return Err(StatusTransitionError {
                task_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch(clock);
        Ok(true)
    }

    /// Forces the task to `Done` regardless of the transition policy.
    ///
    /// Returns `false` when the task was already done.
    pub fn close(&mut self, clock: &impl Clock) -> bool {
        self.close_at(clock.utc())
    }

    /// Forces the task to `Done`, stamping `updated_at` with `at`.
    ///
    /// Batch closers use this so every task closed together shares one
    /// timestamp. Returns `false` when the task was already done.
    pub fn close_at(&mut self, at: DateTime<Utc>) -> bool {
        if self.status == TaskStatus::Done {
            return false;
        }
        self.status = TaskStatus::Done;
        self.updated_at = at;
        true
    }

    /// Returns `true` when the title or description contains `needle`,
    /// ignoring case.
    #[must_use]
    pub fn matches_query(&self, needle: &str) -> bool {
        contains_ignore_case(&self.title, needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| contains_ignore_case(description, needle))
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl Entity for Task {
    type Id = TaskId;
    type Draft = NewTask;

    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> TaskId {
        self.id
    }
}

/// Unsaved task awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a `Todo` draft stamped with the current clock time.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::Todo,
            created_at: clock.utc(),
        }
    }

    /// Sets the description.
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

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the draft description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the draft due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp, also used as the first `updated_at`.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Converts the draft into a stored task with the given identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task::from_persisted(PersistedTaskData {
            id,
            project_id: self.project_id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.created_at,
        })
    }
}

/// Partial task update. `None` fields are left untouched.
///
/// Status changes go through [`Task::transition_to`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement due date.
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    /// Returns `true` when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_date.is_none()
    }
}
