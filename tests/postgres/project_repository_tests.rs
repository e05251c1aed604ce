//! `PostgreSQL` integration tests for the project repository.

use super::helpers::pg_context;
use eyre::{bail, ensure};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use taskboard::tracking::{
    domain::{NewProject, NewTask, ProjectId, ProjectPatch, TaskStatus},
    ports::{
        Page, ProjectRemoval, ProjectRepository, Repository, RepositoryError, TaskFilter,
        TaskRepository,
    },
};

#[rstest]
fn project_crud_round_trip(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;

    let created = rt.block_on(ctx.projects.create(NewProject::new(
        "Launch",
        Some("Ship it".to_owned()),
        &clock,
    )))?;
    ensure!(created.id().value() > 0, "storage should assign the id");

    let Some(mut stored) = rt.block_on(ctx.projects.find_by_id(created.id()))? else {
        bail!("created project should be readable");
    };
    ensure!(stored.title() == "Launch", "title should round-trip");
    ensure!(stored.description() == Some("Ship it"), "description should round-trip");

    stored.apply_patch(
        ProjectPatch {
            title: Some("Relaunch".to_owned()),
            description: None,
        },
        &clock,
    );
    rt.block_on(ctx.projects.update(&stored))?;
    let by_title = rt.block_on(ctx.projects.find_by_title("Relaunch"))?;
    ensure!(
        by_title.map(|project| project.id()) == Some(created.id()),
        "renamed project should be found by its new title"
    );

    let listed = rt.block_on(ctx.projects.list(Page::new(0, 10)))?;
    ensure!(listed.len() == 1, "one project should be listed");

    let removed = rt.block_on(ctx.projects.delete(created.id()))?;
    ensure!(removed.is_some(), "delete should return the removed row");
    ensure!(
        rt.block_on(ctx.projects.find_by_id(created.id()))?.is_none(),
        "deleted project should be gone"
    );
    Ok(())
}

#[rstest]
fn update_of_missing_project_is_not_found(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let ghost = NewProject::new("Ghost", None, &clock).into_project(ProjectId::new(999));

    let result = ctx.runtime.block_on(ctx.projects.update(&ghost));

    ensure!(
        matches!(result, Err(RepositoryError::NotFound { id: 999, .. })),
        "expected NotFound, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn duplicate_title_on_create_maps_to_duplicate_title(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    ctx.runtime
        .block_on(ctx.projects.create(NewProject::new("Launch", None, &clock)))?;

    let result = ctx
        .runtime
        .block_on(ctx.projects.create(NewProject::new("Launch", None, &clock)));

    ensure!(
        matches!(&result, Err(RepositoryError::DuplicateTitle(title)) if title == "Launch"),
        "expected DuplicateTitle, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn duplicate_title_on_update_maps_to_duplicate_title(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;
    rt.block_on(ctx.projects.create(NewProject::new("Launch", None, &clock)))?;
    let mut other = rt.block_on(ctx.projects.create(NewProject::new("Other", None, &clock)))?;

    other.apply_patch(
        ProjectPatch {
            title: Some("Launch".to_owned()),
            description: None,
        },
        &clock,
    );
    let result = rt.block_on(ctx.projects.update(&other));

    ensure!(
        matches!(&result, Err(RepositoryError::DuplicateTitle(title)) if title == "Launch"),
        "expected DuplicateTitle, got {result:?}"
    );
    let Some(unchanged) = rt.block_on(ctx.projects.find_by_id(other.id()))? else {
        bail!("project should still exist");
    };
    ensure!(unchanged.title() == "Other", "failed rename should not persist");
    Ok(())
}

#[rstest]
fn search_matches_title_when_description_is_null(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;
    let bare = rt.block_on(ctx.projects.create(NewProject::new("Rocket Launch", None, &clock)))?;
    let described = rt.block_on(ctx.projects.create(NewProject::new(
        "Garden",
        Some("Launch the greenhouse".to_owned()),
        &clock,
    )))?;
    rt.block_on(ctx.projects.create(NewProject::new("Unrelated", None, &clock)))?;

    let found: Vec<_> = rt
        .block_on(ctx.projects.search("launch"))?
        .iter()
        .map(|project| project.id())
        .collect();

    ensure!(
        found == vec![bare.id(), described.id()],
        "search should match title or description case-insensitively, got {found:?}"
    );
    Ok(())
}

#[rstest]
fn search_treats_wildcards_literally(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;
    let percent = rt.block_on(ctx.projects.create(NewProject::new("100% done", None, &clock)))?;
    rt.block_on(ctx.projects.create(NewProject::new("1000 done", None, &clock)))?;

    let by_percent = rt.block_on(ctx.projects.search("0%"))?;
    let by_underscore = rt.block_on(ctx.projects.search("_"))?;

    ensure!(
        by_percent.iter().map(|project| project.id()).collect::<Vec<_>>() == vec![percent.id()],
        "percent should only match itself"
    );
    ensure!(by_underscore.is_empty(), "underscore should only match itself");
    Ok(())
}

#[rstest]
fn delete_if_idle_refuses_project_with_open_tasks(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;
    let project = rt.block_on(ctx.projects.create(NewProject::new("Launch", None, &clock)))?;
    for status in [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done] {
        rt.block_on(ctx.tasks.create(
            NewTask::new(project.id(), status.as_str(), &clock).with_status(status),
        ))?;
    }

    let outcome = rt.block_on(ctx.projects.delete_if_idle(project.id()))?;

    ensure!(
        outcome == ProjectRemoval::Blocked { active_tasks: 2 },
        "expected two blocking tasks, got {outcome:?}"
    );
    let remaining = rt.block_on(
        ctx.tasks
            .count_where(&TaskFilter::new().in_project(project.id())),
    )?;
    ensure!(remaining == 3, "refused delete should keep every task");
    Ok(())
}

#[rstest]
fn delete_if_idle_cascades_to_finished_tasks(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;
    let clock = DefaultClock;
    let rt = &ctx.runtime;
    let project = rt.block_on(ctx.projects.create(NewProject::new("Launch", None, &clock)))?;
    let keeper = rt.block_on(ctx.projects.create(NewProject::new("Keeper", None, &clock)))?;
    rt.block_on(ctx.tasks.create(
        NewTask::new(project.id(), "Finished", &clock).with_status(TaskStatus::Done),
    ))?;
    let kept_task = rt.block_on(ctx.tasks.create(NewTask::new(keeper.id(), "Other", &clock)))?;

    let outcome = rt.block_on(ctx.projects.delete_if_idle(project.id()))?;

    ensure!(
        matches!(&outcome, ProjectRemoval::Removed(removed) if removed.id() == project.id()),
        "expected removal, got {outcome:?}"
    );
    let orphans = rt.block_on(
        ctx.tasks
            .count_where(&TaskFilter::new().in_project(project.id())),
    )?;
    ensure!(orphans == 0, "cascade should remove the finished task");
    ensure!(
        rt.block_on(ctx.tasks.find_by_id(kept_task.id()))?.is_some(),
        "other projects' tasks should survive"
    );
    Ok(())
}

#[rstest]
fn delete_if_idle_reports_missing_project(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let ctx = pg_context(shared_test_cluster)?;

    let outcome = ctx
        .runtime
        .block_on(ctx.projects.delete_if_idle(ProjectId::new(999)))?;

    ensure!(outcome == ProjectRemoval::Missing, "expected Missing, got {outcome:?}");
    Ok(())
}
