//! Diesel row models for project and task persistence.

use super::schema::{projects, tasks};
use crate::tracking::{
    domain::{
        NewProject, NewTask, PersistedProjectData, PersistedTaskData, Project, ProjectId, Task,
        TaskId, TaskStatus,
    },
    ports::{RepositoryError, RepositoryResult},
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: i64,
    /// Unique title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self::from_persisted(PersistedProjectData {
            id: ProjectId::new(row.id),
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Unique title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Initial update timestamp, equal to `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl From<&NewProject> for NewProjectRow {
    fn from(draft: &NewProject) -> Self {
        Self {
            title: draft.title().to_owned(),
            description: draft.description().map(str::to_owned),
            created_at: draft.created_at(),
            updated_at: draft.created_at(),
        }
    }
}

/// Full-state update model for project records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset {
    /// Unique title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectChangeset {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title().to_owned(),
            description: project.description().map(str::to_owned),
            updated_at: project.updated_at(),
        }
    }
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Owning project identifier.
    pub project_id: i64,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Lifecycle status in storage form.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> RepositoryResult<Self> {
        let status = TaskStatus::try_from(row.status.as_str())
            .map_err(RepositoryError::invalid_persisted_data)?;
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::new(row.id),
            project_id: ProjectId::new(row.project_id),
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning project identifier.
    pub project_id: i64,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Lifecycle status in storage form.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Initial update timestamp, equal to `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl From<&NewTask> for NewTaskRow {
    fn from(draft: &NewTask) -> Self {
        Self {
            project_id: draft.project_id().value(),
            title: draft.title().to_owned(),
            description: draft.description().map(str::to_owned),
            due_date: draft.due_date(),
            status: draft.status().as_str().to_owned(),
            created_at: draft.created_at(),
            updated_at: draft.created_at(),
        }
    }
}

/// Full-state update model for task records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Owning project identifier.
    pub project_id: i64,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Lifecycle status in storage form.
    pub status: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            project_id: task.project_id().value(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
            status: task.status().as_str().to_owned(),
            updated_at: task.updated_at(),
        }
    }
}
