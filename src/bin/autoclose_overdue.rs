//! Closes overdue tasks in the configured `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://... autoclose_overdue
//! ```
//!
//! With `SWEEP_INTERVAL_SECS` unset the binary performs one pass and exits.
//! With it set, the sweep repeats on that period until interrupted with
//! Ctrl-C. Log verbosity follows `RUST_LOG` (default `taskboard=info`).
//! Variables may also come from a `.env` file in the working directory.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use taskboard::{
    config::AppConfig,
    tracking::{
        adapters::postgres::{PostgresProjectRepository, PostgresTaskRepository},
        services::{OverdueSweeper, TaskService, cancel_on_signal},
    },
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder().max_size(config.pool_size).build(manager)?;
    tracing::info!(pool_size = config.pool_size, "database connection pool created");

    let service = TaskService::new(
        Arc::new(PostgresProjectRepository::new(pool.clone())),
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
        config.validation,
    );

    let Some(interval) = config.sweep_interval else {
        let closed = service.autoclose_overdue().await?;
        tracing::info!(closed, "single overdue sweep complete");
        return Ok(());
    };

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), cancel.clone()));

    let report = OverdueSweeper::new(service, interval).run(cancel).await;
    tracing::info!(runs = report.runs, closed = report.closed, "shutdown complete");
    Ok(())
}
