//! `PostgreSQL` task repository.

use super::{
    TrackingPgPool, is_missing_project, like_pattern,
    models::{NewTaskRow, TaskChangeset, TaskRow},
    run_in_transaction,
    schema::tasks,
    to_count,
};
use crate::tracking::{
    domain::{NewTask, ProjectId, Task, TaskId, TaskStatus},
    ports::{Page, Repository, RepositoryError, RepositoryResult, TaskFilter, TaskRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

type TaskPredicate = Box<dyn BoxableExpression<tasks::table, Pg, SqlType = Bool>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TrackingPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackingPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Task> for PostgresTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        run_in_transaction(&self.pool, move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(Task::try_from).transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> RepositoryResult<Vec<Task>> {
        run_in_transaction(&self.pool, move |connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .offset(i64::from(page.offset()))
                .limit(i64::from(page.limit()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(Task::try_from).collect()
        })
        .await
    }

    async fn create(&self, draft: NewTask) -> RepositoryResult<Task> {
        let project_id = draft.project_id();
        let new_row = NewTaskRow::from(&draft);
        run_in_transaction(&self.pool, move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| missing_project_or(err, project_id))?;
            Task::try_from(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> RepositoryResult<()> {
        let id = task.id();
        let project_id = task.project_id();
        let changes = TaskChangeset::from(task);
        run_in_transaction(&self.pool, move |connection| {
            let affected = diesel::update(tasks::table.find(id.value()))
                .set(&changes)
                .execute(connection)
                .map_err(|err| missing_project_or(err, project_id))?;
            if affected == 0 {
                return Err(RepositoryError::not_found::<Task>(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        run_in_transaction(&self.pool, move |connection| {
            let row = diesel::delete(tasks::table.find(id.value()))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()?;
            row.map(Task::try_from).transpose()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_where(&self, filter: &TaskFilter) -> RepositoryResult<Vec<Task>> {
        let owned_filter = filter.clone();
        run_in_transaction(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(filter_predicate(&owned_filter))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(Task::try_from).collect()
        })
        .await
    }

    async fn count_where(&self, filter: &TaskFilter) -> RepositoryResult<u64> {
        let owned_filter = filter.clone();
        run_in_transaction(&self.pool, move |connection| {
            let raw = tasks::table
                .filter(filter_predicate(&owned_filter))
                .count()
                .get_result::<i64>(connection)?;
            to_count(raw)
        })
        .await
    }

    async fn search(&self, project_id: ProjectId, query: &str) -> RepositoryResult<Vec<Task>> {
        let pattern = like_pattern(query);
        run_in_transaction(&self.pool, move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .filter(
                    tasks::title
                        .ilike(pattern.clone())
                        .or(tasks::description.assume_not_null().ilike(pattern)),
                )
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(Task::try_from).collect()
        })
        .await
    }

    async fn close_overdue(&self, now: DateTime<Utc>) -> RepositoryResult<u64> {
        let overdue = TaskFilter::new()
            .with_statuses(TaskStatus::ACTIVE)
            .due_before(now.date_naive());
        run_in_transaction(&self.pool, move |connection| {
            let affected = diesel::update(tasks::table.filter(filter_predicate(&overdue)))
                .set((
                    tasks::status.eq(TaskStatus::Done.as_str()),
                    tasks::updated_at.eq(now),
                ))
                .execute(connection)?;
            Ok(u64::try_from(affected).unwrap_or(u64::MAX))
        })
        .await
    }
}

fn filter_predicate(filter: &TaskFilter) -> TaskPredicate {
    let mut predicate: TaskPredicate = Box::new(sql::<Bool>("TRUE"));
    if let Some(project_id) = filter.project_id() {
        predicate = Box::new(predicate.and(tasks::project_id.eq(project_id.value())));
    }
    if let Some(statuses) = filter.statuses() {
        let names: Vec<&'static str> = statuses.iter().map(|status| status.as_str()).collect();
        predicate = Box::new(predicate.and(tasks::status.eq_any(names)));
    }
    if let Some(bound) = filter.due_before_date() {
        predicate = Box::new(
            predicate.and(
                tasks::due_date
                    .is_not_null()
                    .and(tasks::due_date.assume_not_null().lt(bound)),
            ),
        );
    }
    predicate
}

fn missing_project_or(err: diesel::result::Error, project_id: ProjectId) -> RepositoryError {
    if is_missing_project(&err) {
        RepositoryError::MissingProject(project_id)
    } else {
        err.into()
    }
}
