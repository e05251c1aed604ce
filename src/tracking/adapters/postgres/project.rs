//! `PostgreSQL` project repository.

use super::{
    TrackingPgPool, is_title_violation, like_pattern,
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    run_in_transaction,
    schema::{projects, tasks},
    to_count,
};
use crate::tracking::{
    domain::{NewProject, Project, ProjectId, TaskStatus},
    ports::{
        Page, ProjectRemoval, ProjectRepository, Repository, RepositoryError, RepositoryResult,
    },
    validation::project_deletable,
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: TrackingPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackingPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Project> for PostgresProjectRepository {
    async fn find_by_id(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        run_in_transaction(&self.pool, move |connection| {
            let row = projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(Project::from))
        })
        .await
    }

    async fn list(&self, page: Page) -> RepositoryResult<Vec<Project>> {
        run_in_transaction(&self.pool, move |connection| {
            let rows = projects::table
                .order(projects::id.asc())
                .offset(i64::from(page.offset()))
                .limit(i64::from(page.limit()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            Ok(rows.into_iter().map(Project::from).collect())
        })
        .await
    }

    async fn create(&self, draft: NewProject) -> RepositoryResult<Project> {
        let new_row = NewProjectRow::from(&draft);
        run_in_transaction(&self.pool, move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map(Project::from)
                .map_err(|err| {
                    if is_title_violation(&err) {
                        RepositoryError::DuplicateTitle(new_row.title.clone())
                    } else {
                        err.into()
                    }
                })
        })
        .await
    }

    async fn update(&self, project: &Project) -> RepositoryResult<()> {
        let id = project.id();
        let changes = ProjectChangeset::from(project);
        run_in_transaction(&self.pool, move |connection| {
            let affected = diesel::update(projects::table.find(id.value()))
                .set(&changes)
                .execute(connection)
                .map_err(|err| {
                    if is_title_violation(&err) {
                        RepositoryError::DuplicateTitle(changes.title.clone())
                    } else {
                        err.into()
                    }
                })?;
            if affected == 0 {
                return Err(RepositoryError::not_found::<Project>(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        run_in_transaction(&self.pool, move |connection| {
            let row = diesel::delete(projects::table.find(id.value()))
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(Project::from))
        })
        .await
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_title(&self, title: &str) -> RepositoryResult<Option<Project>> {
        let lookup = title.to_owned();
        run_in_transaction(&self.pool, move |connection| {
            let row = projects::table
                .filter(projects::title.eq(lookup))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            Ok(row.map(Project::from))
        })
        .await
    }

    async fn search(&self, query: &str) -> RepositoryResult<Vec<Project>> {
        let pattern = like_pattern(query);
        run_in_transaction(&self.pool, move |connection| {
            let rows = projects::table
                .filter(
                    projects::title
                        .ilike(pattern.clone())
                        .or(projects::description.assume_not_null().ilike(pattern)),
                )
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            Ok(rows.into_iter().map(Project::from).collect())
        })
        .await
    }

    async fn delete_if_idle(&self, id: ProjectId) -> RepositoryResult<ProjectRemoval> {
        run_in_transaction(&self.pool, move |connection| {
            // Task inserts take a key-share lock on the referenced project,
            // so this row lock holds them off until the delete commits.
            let locked = projects::table
                .find(id.value())
                .select(projects::id)
                .for_update()
                .get_result::<i64>(connection)
                .optional()?;
            if locked.is_none() {
                return Ok(ProjectRemoval::Missing);
            }

            let active_names: Vec<&'static str> = TaskStatus::ACTIVE
                .iter()
                .map(|status| status.as_str())
                .collect();
            let raw = tasks::table
                .filter(tasks::project_id.eq(id.value()))
                .filter(tasks::status.eq_any(active_names))
                .count()
                .get_result::<i64>(connection)?;
            let active_tasks = to_count(raw)?;
            if !project_deletable(active_tasks) {
                return Ok(ProjectRemoval::Blocked { active_tasks });
            }

            let row = diesel::delete(projects::table.find(id.value()))
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)?;
            Ok(ProjectRemoval::Removed(Project::from(row)))
        })
        .await
    }
}
