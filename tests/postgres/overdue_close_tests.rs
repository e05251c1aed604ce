//! `PostgreSQL` integration tests for closing overdue tasks in one batch.

use super::helpers::{days_ago, pg_context};
use chrono::Utc;
use eyre::ensure;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use taskboard::tracking::{
    domain::{NewProject, NewTask, TaskStatus},
    ports::{Repository, TaskFilter, TaskRepository},
};

/// Makes any write that closes a task titled `Refuse` fail.
const REFUSE_CLOSE_TRIGGER_SQL: &str = r"
CREATE FUNCTION refuse_close() RETURNS trigger AS $$
BEGIN
    IF NEW.title = 'Refuse' AND NEW.status = 'done' THEN
        RAISE EXCEPTION 'close refused for task %', NEW.id;
    END IF;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER refuse_close BEFORE UPDATE ON tasks
    FOR EACH ROW EXECUTE FUNCTION refuse_close();
";

#[rstest]
fn close_overdue_closes_only_open_overdue_tasks(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;
    let project = rt.block_on(ctx.projects.create(NewProject::new("Launch", None, &clock)))?;
    let yesterday = days_ago(1)?;
    let today = days_ago(0)?;
    for (title, status) in [("Todo", TaskStatus::Todo), ("Doing", TaskStatus::Doing)] {
        rt.block_on(ctx.tasks.create(
            NewTask::new(project.id(), title, &clock)
                .with_due_date(yesterday)
                .with_status(status),
        ))?;
    }
    let due_today = rt.block_on(ctx.tasks.create(
        NewTask::new(project.id(), "Due today", &clock).with_due_date(today),
    ))?;
    let undated = rt.block_on(ctx.tasks.create(NewTask::new(project.id(), "Undated", &clock)))?;

    let now = Utc::now();
    let closed = rt.block_on(ctx.tasks.close_overdue(now))?;
    let again = rt.block_on(ctx.tasks.close_overdue(now))?;

    ensure!(closed == 2, "both overdue open tasks should close, got {closed}");
    ensure!(again == 0, "a second pass should find nothing, got {again}");
    let done = rt.block_on(ctx.tasks.find_where(
        &TaskFilter::new()
            .in_project(project.id())
            .with_statuses([TaskStatus::Done]),
    ))?;
    ensure!(
        done.iter().all(|task| task.due_date() == Some(yesterday)),
        "only overdue tasks should be done"
    );
    for id in [due_today.id(), undated.id()] {
        let status = rt
            .block_on(ctx.tasks.find_by_id(id))?
            .map(|task| task.status());
        ensure!(status == Some(TaskStatus::Todo), "task {id} should stay open");
    }
    Ok(())
}

#[rstest]
fn failed_close_overdue_rolls_back_the_whole_batch(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;
    let project = rt.block_on(ctx.projects.create(NewProject::new("Launch", None, &clock)))?;
    let yesterday = days_ago(1)?;
    for title in ["First", "Refuse", "Third"] {
        rt.block_on(ctx.tasks.create(
            NewTask::new(project.id(), title, &clock).with_due_date(yesterday),
        ))?;
    }
    ctx.execute_sql(REFUSE_CLOSE_TRIGGER_SQL)?;

    let result = rt.block_on(ctx.tasks.close_overdue(Utc::now()));

    ensure!(result.is_err(), "the refused row should fail the batch");
    let still_open = rt.block_on(ctx.tasks.count_where(
        &TaskFilter::new()
            .in_project(project.id())
            .with_statuses([TaskStatus::Todo]),
    ))?;
    ensure!(still_open == 3, "no task should be closed, {still_open} still open");
    Ok(())
}
