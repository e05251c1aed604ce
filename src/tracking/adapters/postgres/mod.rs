//! `PostgreSQL` adapters for project and task persistence.
//!
//! Every repository call checks out one pooled connection on the blocking
//! thread pool and runs inside a single transaction.

pub(crate) mod models;
mod project;
mod schema;
mod task;

pub use project::PostgresProjectRepository;
pub use task::PostgresTaskRepository;

use crate::tracking::ports::{RepositoryError, RepositoryResult};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by tracking adapters.
pub type TrackingPgPool = Pool<ConnectionManager<PgConnection>>;

/// Unique constraint guarding project titles.
const PROJECT_TITLE_CONSTRAINT: &str = "projects_title_key";

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

async fn run_in_transaction<F, T>(pool: &TrackingPgPool, f: F) -> RepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut pooled = shared.get().map_err(RepositoryError::persistence)?;
        let connection: &mut PgConnection = &mut pooled;
        connection.transaction(f)
    })
    .await
    .map_err(RepositoryError::persistence)?
}

fn is_title_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(PROJECT_TITLE_CONSTRAINT)
    )
}

fn is_missing_project(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}

/// Builds an `ILIKE` pattern matching `query` as a literal substring.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn to_count(raw: i64) -> RepositoryResult<u64> {
    u64::try_from(raw).map_err(RepositoryError::invalid_persisted_data)
}
