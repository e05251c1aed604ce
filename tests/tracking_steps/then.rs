//! Then steps for project and task tracking BDD scenarios.

use super::world::{TrackingWorld, run_async};
use eyre::{ensure, eyre};
use rstest_bdd_macros::then;
use taskboard::tracking::{
    domain::{ProjectId, TaskId, TaskStatus},
    services::TrackingError,
};

#[then("the project has identifier {id:i64}")]
fn project_has_identifier(world: &TrackingWorld, id: i64) -> Result<(), eyre::Report> {
    let project = world
        .last_project
        .as_ref()
        .ok_or_else(|| eyre!("missing project in scenario world"))?;
    ensure!(
        project.id() == ProjectId::new(id),
        "expected project {id}, found {}",
        project.id()
    );
    Ok(())
}

#[then("the task has identifier {id:i64}")]
fn task_has_identifier(world: &TrackingWorld, id: i64) -> Result<(), eyre::Report> {
    let task = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre!("missing task in scenario world"))?;
    ensure!(
        task.id() == TaskId::new(id),
        "expected task {id}, found {}",
        task.id()
    );
    Ok(())
}

#[then("the sweep closed {count:u64} task")]
fn sweep_closed(world: &TrackingWorld, count: u64) -> Result<(), eyre::Report> {
    ensure!(
        world.closed_by_sweep == Some(count),
        "expected sweep to close {count}, got {:?}",
        world.closed_by_sweep
    );
    Ok(())
}

#[then(r#"task {id:i64} has status "{status}""#)]
fn task_has_status(world: &TrackingWorld, id: i64, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre!("invalid expected status in scenario: {err}"))?;
    let task = run_async(world.tasks.get(TaskId::new(id)))?;
    ensure!(
        task.status() == expected,
        "expected status {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"creation fails with a duplicate title error for "{title}""#)]
fn duplicate_title_error(world: &TrackingWorld, title: String) -> Result<(), eyre::Report> {
    match world.last_failure.as_ref() {
        Some(TrackingError::DuplicateTitle { title: reported }) if *reported == title => Ok(()),
        other => Err(eyre!("expected DuplicateTitle({title}), got {other:?}")),
    }
}

#[then("creation fails with a project not found error for {id:i64}")]
fn project_not_found_error(world: &TrackingWorld, id: i64) -> Result<(), eyre::Report> {
    match world.last_failure.as_ref() {
        Some(TrackingError::ProjectNotFound { project_id }) if *project_id == ProjectId::new(id) => {
            Ok(())
        }
        other => Err(eyre!("expected ProjectNotFound({id}), got {other:?}")),
    }
}

#[then("deletion fails because {count:u64} task is still active")]
fn deletion_refused(world: &TrackingWorld, count: u64) -> Result<(), eyre::Report> {
    match world.last_failure.as_ref() {
        Some(TrackingError::HasActiveTasks { count: reported, .. }) if *reported == count => Ok(()),
        other => Err(eyre!("expected HasActiveTasks({count}), got {other:?}")),
    }
}

#[then("the project still exists")]
fn project_still_exists(world: &TrackingWorld) -> Result<(), eyre::Report> {
    let project = world
        .last_project
        .as_ref()
        .ok_or_else(|| eyre!("missing project in scenario world"))?;
    run_async(world.projects.get(project.id()))?;
    Ok(())
}
