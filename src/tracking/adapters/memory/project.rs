//! In-memory project repository.

use super::{InMemoryTrackingStore, page_bounds};
use crate::tracking::{
    domain::{NewProject, Project, ProjectId},
    ports::{
        Page, ProjectRemoval, ProjectRepository, Repository, RepositoryError, RepositoryResult,
    },
    validation::project_deletable,
};
use async_trait::async_trait;

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    store: InMemoryTrackingStore,
}

impl InMemoryProjectRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: InMemoryTrackingStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Repository<Project> for InMemoryProjectRepository {
    async fn find_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        let state = self.store.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> RepositoryResult<Vec<Project>> {
        let (offset, limit) = page_bounds(page);
        let state = self.store.read()?;
        Ok(state
            .projects
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: NewProject) -> RepositoryResult<Project> {
        let mut state = self.store.write()?;
        if state
            .projects
            .values()
            .any(|project| project.title() == draft.title())
        {
            return Err(RepositoryError::DuplicateTitle(draft.title().to_owned()));
        }
        let id = state.next_project_id();
        let project = draft.into_project(id);
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn update(&self, project: &Project) -> RepositoryResult<()> {
        let mut state = self.store.write()?;
        if !state.projects.contains_key(&project.id()) {
            return Err(RepositoryError::not_found::<Project>(project.id()));
        }
        if state
            .projects
            .values()
            .any(|other| other.id() != project.id() && other.title() == project.title())
        {
            return Err(RepositoryError::DuplicateTitle(project.title().to_owned()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        let mut state = self.store.write()?;
        let removed = state.projects.remove(&id);
        if removed.is_some() {
            state.tasks.retain(|_, task| task.project_id() != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_title(&self, title: &str) -> RepositoryResult<Option<Project>> {
        let state = self.store.read()?;
        Ok(state
            .projects
            .values()
            .find(|project| project.title() == title)
            .cloned())
    }

    async fn search(&self, query: &str) -> RepositoryResult<Vec<Project>> {
        let state = self.store.read()?;
        Ok(state
            .projects
            .values()
            .filter(|project| project.matches_query(query))
            .cloned()
            .collect())
    }

    async fn delete_if_idle(&self, id: ProjectId) -> RepositoryResult<ProjectRemoval> {
        let mut state = self.store.write()?;
        if !state.projects.contains_key(&id) {
            return Ok(ProjectRemoval::Missing);
        }
        let active = state
            .tasks
            .values()
            .filter(|task| task.project_id() == id && task.status().is_active())
            .count();
        let active_tasks = u64::try_from(active).unwrap_or(u64::MAX);
        if !project_deletable(active_tasks) {
            return Ok(ProjectRemoval::Blocked { active_tasks });
        }
        state.tasks.retain(|_, task| task.project_id() != id);
        Ok(state
            .projects
            .remove(&id)
            .map_or(ProjectRemoval::Missing, ProjectRemoval::Removed))
    }
}
