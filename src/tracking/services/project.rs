//! Service layer for project orchestration.

use super::{TrackingError, TrackingResult};
use crate::tracking::{
    domain::{NewProject, Project, ProjectId, ProjectPatch},
    ports::{Page, ProjectRemoval, ProjectRepository, RepositoryError},
    validation::{ValidationConfig, check_project_description, check_project_title, title_unique},
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    title: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for a partial project update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    patch: ProjectPatch,
}

impl UpdateProjectRequest {
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
}

/// Project orchestration service.
pub struct ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    clock: Arc<C>,
    config: ValidationConfig,
}

impl<P, C> Clone for ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<P, C> ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, clock: Arc<C>, config: ValidationConfig) -> Self {
        Self {
            projects,
            clock,
            config,
        }
    }

    /// Creates a project with a unique title.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::ValidationFailure`] for invalid fields,
    /// [`TrackingError::DuplicateTitle`] when the title is taken, or
    /// [`TrackingError::Repository`] when storage fails.
    pub async fn create(&self, request: CreateProjectRequest) -> TrackingResult<Project> {
        let CreateProjectRequest { title, description } = request;
        check_project_title(&title, &self.config)?;
        if let Some(text) = description.as_deref() {
            check_project_description(text, &self.config)?;
        }
        self.ensure_title_available(&title, None).await?;

        let draft = NewProject::new(title, description, &*self.clock);
        let project = self.projects.create(draft).await?;
        tracing::info!(project_id = %project.id(), title = project.title(), "project created");
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotFound`] when the project does not exist.
    pub async fn get(&self, id: ProjectId) -> TrackingResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found::<Project>(id).into())
    }

    /// Returns a page of projects in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Repository`] when storage fails.
    pub async fn list(&self, page: Page) -> TrackingResult<Vec<Project>> {
        Ok(self.projects.list(page).await?)
    }

    /// Applies the supplied fields to a project.
    ///
    /// Re-using the project's own title is not a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotFound`] when the project does not exist,
    /// [`TrackingError::ValidationFailure`] for invalid fields, or
    /// [`TrackingError::DuplicateTitle`] when another project uses the new
    /// title.
    pub async fn update(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> TrackingResult<Project> {
        let mut project = self.get(id).await?;
        let UpdateProjectRequest { patch } = request;

        if let Some(title) = patch.title.as_deref() {
            check_project_title(title, &self.config)?;
            self.ensure_title_available(title, Some(id)).await?;
        }
        if let Some(text) = patch.description.as_deref() {
            check_project_description(text, &self.config)?;
        }

        if project.apply_patch(patch, &*self.clock) {
            self.projects.update(&project).await?;
            tracing::info!(project_id = %id, "project updated");
        }
        Ok(project)
    }

    /// Deletes a project and, through storage cascade, all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotFound`] when the project does not exist or
    /// [`TrackingError::HasActiveTasks`] when any of its tasks is `TODO` or
    /// `DOING`.
    pub async fn delete(&self, id: ProjectId) -> TrackingResult<Project> {
        match self.projects.delete_if_idle(id).await? {
            ProjectRemoval::Removed(deleted) => {
                tracing::info!(project_id = %deleted.id(), "project deleted");
                Ok(deleted)
            }
            ProjectRemoval::Missing => Err(RepositoryError::not_found::<Project>(id).into()),
            ProjectRemoval::Blocked { active_tasks } => {
                tracing::warn!(project_id = %id, active_tasks, "project deletion refused");
                Err(TrackingError::HasActiveTasks {
                    project_id: id,
                    count: active_tasks,
                })
            }
        }
    }

    /// Finds projects whose title or description contains `query`,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Repository`] when storage fails.
    pub async fn search(&self, query: &str) -> TrackingResult<Vec<Project>> {
        Ok(self.projects.search(query).await?)
    }

    async fn ensure_title_available(
        &self,
        title: &str,
        excluding: Option<ProjectId>,
    ) -> TrackingResult<()> {
        let existing = self.projects.find_by_title(title).await?;
        let taken = existing.iter().map(|project| (project.id(), project.title()));
        if title_unique(title, taken, excluding) {
            return Ok(());
        }
        Err(TrackingError::DuplicateTitle {
            title: title.to_owned(),
        })
    }
}
