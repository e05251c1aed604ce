//! Shared helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::{WrapErr, eyre};
use mockable::Clock;
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use taskboard::tracking::adapters::postgres::{
    PostgresProjectRepository, PostgresTaskRepository, TrackingPgPool,
};
use tokio::runtime::Runtime;

/// Schema applied to the template database.
const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_projects_and_tasks/up.sql");

/// Template database name for the pre-migrated schema.
const TEMPLATE_DB: &str = "taskboard_test_template";

/// Repositories over one freshly cloned database.
///
/// The database is force-dropped when the context goes out of scope, even
/// if the test panicked.
pub struct PgContext {
    /// Project repository under test.
    pub projects: PostgresProjectRepository,
    /// Task repository under test.
    pub tasks: PostgresTaskRepository,
    /// Runtime driving the async repository calls.
    pub runtime: Runtime,
    database: Option<TemporaryDatabase>,
}

impl PgContext {
    /// Runs raw SQL against the test database on a dedicated connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or any statement fails.
    pub fn execute_sql(&self, sql: &str) -> eyre::Result<()> {
        let url = self
            .database
            .as_ref()
            .map(TemporaryDatabase::url)
            .ok_or_else(|| eyre!("test database already dropped"))?;
        let mut conn = PgConnection::establish(url).wrap_err("connect to test database")?;
        conn.batch_execute(sql).wrap_err("execute test SQL")?;
        Ok(())
    }
}

impl Drop for PgContext {
    #[expect(
        clippy::print_stderr,
        reason = "Test cleanup warnings are informational"
    )]
    fn drop(&mut self) {
        if let Some(database) = self.database.take() {
            let name = database.name().to_owned();
            if let Err(err) = database.force_drop() {
                eprintln!("Warning: failed to drop test database {name}: {err}");
            }
        }
    }
}

/// Ensures the template database exists with the schema applied.
fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster.ensure_template_exists(TEMPLATE_DB, |db_name| {
        let url = cluster.connection().database_url(db_name);
        let mut conn = PgConnection::establish(&url).map_err(|err| eyre!("{err}"))?;
        conn.batch_execute(CREATE_TABLES_SQL)
            .map_err(|err| eyre!("{err}"))?;
        Ok(())
    })?;
    Ok(())
}

/// Clones the template into a uniquely named database and builds both
/// repositories over a shared pool.
///
/// # Errors
///
/// Returns an error if the template, the clone, the pool or the runtime
/// cannot be set up.
pub fn pg_context(cluster: &TestCluster) -> eyre::Result<PgContext> {
    ensure_template(cluster)?;
    let db_name = format!("taskboard_test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster.temporary_database_from_template(db_name, TEMPLATE_DB)?;
    let manager = ConnectionManager::<PgConnection>::new(database.url());
    let pool: TrackingPgPool = Pool::builder().max_size(2).build(manager)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(PgContext {
        projects: PostgresProjectRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool),
        runtime,
        database: Some(database),
    })
}

/// Clock pinned to one instant, for deterministic `created_at` values.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Returns a clock reading a fixed base instant plus `seconds`.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant is out of range.
    pub fn at_second(seconds: i64) -> eyre::Result<Self> {
        Utc.timestamp_opt(1_790_000_000 + seconds, 0)
            .single()
            .map(Self)
            .ok_or_else(|| eyre!("timestamp {seconds} is out of range"))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns the UTC date `days` before today.
///
/// # Errors
///
/// Returns an error if the date is out of range.
pub fn days_ago(days: u64) -> eyre::Result<NaiveDate> {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| eyre!("date {days} days ago is out of range"))
}
