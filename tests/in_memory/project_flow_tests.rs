//! In-memory integration tests for project lifecycle operations.

use super::helpers::{Tracker, tracker};
use eyre::{ensure, eyre};
use rstest::rstest;
use taskboard::tracking::{
    domain::TaskStatus,
    ports::{Page, ProjectRepository, TaskFilter, TaskRepository},
    services::{CreateProjectRequest, CreateTaskRequest, TrackingError, UpdateProjectRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_with_same_title_admit_one(tracker: Tracker) -> eyre::Result<()> {
    let first = tracker.projects.create(CreateProjectRequest::new("Launch"));
    let second = tracker.projects.create(CreateProjectRequest::new("Launch"));
    let (left, right) = tokio::join!(first, second);

    let successes = [left.is_ok(), right.is_ok()].iter().filter(|ok| **ok).count();
    ensure!(successes == 1, "exactly one create should succeed, got {successes}");
    let stored = tracker.projects.list(Page::default()).await?;
    ensure!(stored.len() == 1, "one project should be stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retitled_project_frees_old_title(tracker: Tracker) -> eyre::Result<()> {
    let original = tracker
        .projects
        .create(CreateProjectRequest::new("Launch"))
        .await?;
    tracker
        .projects
        .update(original.id(), UpdateProjectRequest::new().with_title("Relaunch"))
        .await?;

    let reused = tracker
        .projects
        .create(CreateProjectRequest::new("Launch"))
        .await?;

    ensure!(reused.id() != original.id(), "a new project should be created");
    let by_title = tracker.store.projects().find_by_title("Relaunch").await?;
    ensure!(
        by_title.map(|project| project.id()) == Some(original.id()),
        "renamed project should be found by its new title"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refused_delete_leaves_everything_in_place(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker
        .projects
        .create(CreateProjectRequest::new("Launch"))
        .await?;
    for (title, status) in [
        ("Todo", TaskStatus::Todo),
        ("Doing", TaskStatus::Doing),
        ("Done", TaskStatus::Done),
    ] {
        tracker
            .tasks
            .create(CreateTaskRequest::new(project.id(), title).with_status(status))
            .await?;
    }

    let result = tracker.projects.delete(project.id()).await;

    match result {
        Err(TrackingError::HasActiveTasks { count: 2, .. }) => {}
        other => return Err(eyre!("expected HasActiveTasks(2), got {other:?}")),
    }
    let remaining = tracker.tasks.count_for_project(project.id()).await?;
    ensure!(remaining == 3, "all tasks should remain, found {remaining}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_after_finishing_work_removes_tasks(tracker: Tracker) -> eyre::Result<()> {
    let project = tracker
        .projects
        .create(CreateProjectRequest::new("Launch"))
        .await?;
    let task = tracker
        .tasks
        .create(CreateTaskRequest::new(project.id(), "Ship it"))
        .await?;
    tracker.tasks.mark_done(task.id()).await?;

    tracker.projects.delete(project.id()).await?;

    let orphans = tracker
        .store
        .tasks()
        .count_where(&TaskFilter::new().in_project(project.id()))
        .await?;
    ensure!(orphans == 0, "tasks should be removed with their project");
    Ok(())
}
