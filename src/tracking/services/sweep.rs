//! Periodic auto-close of overdue tasks.
//!
//! The sweeper wraps [`TaskService::autoclose_overdue`] in a
//! `tokio::time::interval` loop that runs until its cancellation token
//! fires. A failing pass is logged and the loop carries on with the next
//! tick.

use super::{TaskService, TrackingResult};
use crate::tracking::ports::{ProjectRepository, TaskRepository};
use mockable::Clock;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Shortest period the sweep loop accepts.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(10);

/// Summary of a sweep loop that has stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Passes that completed successfully.
    pub runs: u64,
    /// Tasks closed across all passes.
    pub closed: u64,
}

/// Runs the overdue auto-close on a fixed interval.
pub struct OverdueSweeper<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskService<P, T, C>,
    interval: Duration,
}

impl<P, T, C> OverdueSweeper<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper. Periods below [`MIN_SWEEP_INTERVAL`] are raised to
    /// it.
    #[must_use]
    pub fn new(service: TaskService<P, T, C>, interval: Duration) -> Self {
        Self {
            service,
            interval: interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    /// Returns the effective sweep period.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Performs a single pass and returns how many tasks were closed.
    ///
    /// # Errors
    ///
    /// Propagates the failure of [`TaskService::autoclose_overdue`].
    pub async fn run_once(&self) -> TrackingResult<u64> {
        self.service.autoclose_overdue().await
    }

    /// Sweeps on every tick until `cancel` fires. The first pass runs
    /// immediately.
    pub async fn run(&self, cancel: CancellationToken) -> SweepReport {
        tracing::info!(
            interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
            "overdue sweeper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut report = SweepReport::default();

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => match self.run_once().await {
                    Ok(closed) => {
                        report.runs += 1;
                        report.closed += closed;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "overdue sweep failed");
                    }
                },
            }
        }

        tracing::info!(runs = report.runs, closed = report.closed, "overdue sweeper stopped");
        report
    }
}

/// Cancels `cancel` once `signal` resolves successfully.
///
/// When the signal cannot be awaited (for example, the handler failed to
/// register) the error is logged and the token is left alone, so a running
/// sweeper keeps going rather than stopping after its first pass.
pub async fn cancel_on_signal<F>(signal: F, cancel: CancellationToken)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("shutdown signal received");
            cancel.cancel();
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
        }
    }
}
