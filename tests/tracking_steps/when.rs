//! When steps for project and task tracking BDD scenarios.

use super::world::{TrackingWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::when;
use taskboard::tracking::{
    domain::ProjectId,
    services::{CreateProjectRequest, CreateTaskRequest},
};

#[when("the overdue sweep runs")]
fn sweep_runs(world: &mut TrackingWorld) -> Result<(), eyre::Report> {
    let closed = run_async(world.tasks.autoclose_overdue()).wrap_err("run overdue sweep")?;
    world.closed_by_sweep = Some(closed);
    Ok(())
}

#[when(r#"another project titled "{title}" is created"#)]
fn another_project_created(world: &mut TrackingWorld, title: String) {
    if let Err(err) = run_async(world.projects.create(CreateProjectRequest::new(title))) {
        world.last_failure = Some(err);
    }
}

#[when(r#"a task titled "{title}" is created in project {project_id:i64}"#)]
fn task_created_in_project(world: &mut TrackingWorld, title: String, project_id: i64) {
    let request = CreateTaskRequest::new(ProjectId::new(project_id), title);
    match run_async(world.tasks.create(request)) {
        Ok(task) => world.last_task = Some(task),
        Err(err) => world.last_failure = Some(err),
    }
}

#[when("the project is deleted")]
fn project_deleted(world: &mut TrackingWorld) -> Result<(), eyre::Report> {
    let project_id = world
        .last_project
        .as_ref()
        .map(|project| project.id())
        .ok_or_else(|| eyre!("missing project in scenario world"))?;
    if let Err(err) = run_async(world.projects.delete(project_id)) {
        world.last_failure = Some(err);
    }
    Ok(())
}
