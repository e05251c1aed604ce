//! Individual validation and transition rules.
//!
//! Every rule is a pure function over proposed values and current state.
//! Predicates return `bool`; the `check_*` helpers wrap them and report a
//! typed [`ValidationFailure`] naming the offending field.

use super::ValidationConfig;
use crate::tracking::domain::{
    Field, ProjectId, TaskStatus, TransitionPolicy, ValidationFailure, ValidationReason,
};
use chrono::{DateTime, NaiveDate, Utc};

/// Returns `true` when no project other than `excluding` already uses
/// `candidate` as its title. Comparison is exact and case-sensitive.
#[must_use]
pub fn title_unique<'a>(
    candidate: &str,
    existing: impl IntoIterator<Item = (ProjectId, &'a str)>,
    excluding: Option<ProjectId>,
) -> bool {
    !existing
        .into_iter()
        .any(|(id, title)| title == candidate && Some(id) != excluding)
}

/// Returns `true` when `text` has at most `max_len` characters.
#[must_use]
pub fn within_length(text: &str, max_len: usize) -> bool {
    text.chars().count() <= max_len
}

/// Returns `true` when a project with `active_task_count` active tasks may
/// be deleted.
#[must_use]
pub const fn project_deletable(active_task_count: u64) -> bool {
    active_task_count == 0
}

/// Returns `true` when a task is overdue at `now`: it has a due date,
/// that date is strictly before the UTC calendar date of `now`, and the
/// task is not done.
#[must_use]
pub fn is_overdue(due_date: Option<NaiveDate>, now: DateTime<Utc>, status: TaskStatus) -> bool {
    status != TaskStatus::Done && due_date.is_some_and(|due| due < now.date_naive())
}

/// Returns `true` when `policy` permits moving from `from` to `to`.
#[must_use]
pub const fn transition_allowed(from: TaskStatus, to: TaskStatus, policy: TransitionPolicy) -> bool {
    from.can_transition_to(to, policy)
}

/// Validates a project title.
///
/// # Errors
///
/// Returns a [`ValidationFailure`] for [`Field::ProjectTitle`] when the
/// title is blank or too long.
pub fn check_project_title(title: &str, config: &ValidationConfig) -> Result<(), ValidationFailure> {
    check_required(Field::ProjectTitle, title, config.project_title_max_chars)
}

/// Validates a project description.
///
/// # Errors
///
/// Returns a [`ValidationFailure`] for [`Field::ProjectDescription`] when
/// the description is too long.
pub fn check_project_description(
    description: &str,
    config: &ValidationConfig,
) -> Result<(), ValidationFailure> {
    check_max(
        Field::ProjectDescription,
        description,
        config.project_description_max_chars,
    )
}

/// Validates a task title.
///
/// # Errors
///
/// Returns a [`ValidationFailure`] for [`Field::TaskTitle`] when the title
/// is blank or too long.
pub fn check_task_title(title: &str, config: &ValidationConfig) -> Result<(), ValidationFailure> {
    check_required(Field::TaskTitle, title, config.task_title_max_chars)
}

/// Validates a task description.
///
/// # Errors
///
/// Returns a [`ValidationFailure`] for [`Field::TaskDescription`] when the
/// description is too long.
pub fn check_task_description(
    description: &str,
    config: &ValidationConfig,
) -> Result<(), ValidationFailure> {
    check_max(
        Field::TaskDescription,
        description,
        config.task_description_max_chars,
    )
}

fn check_required(field: Field, value: &str, max: usize) -> Result<(), ValidationFailure> {
    if value.trim().is_empty() {
        return Err(ValidationFailure::new(field, ValidationReason::Blank));
    }
    check_max(field, value, max)
}

fn check_max(field: Field, value: &str, max: usize) -> Result<(), ValidationFailure> {
    if within_length(value, max) {
        return Ok(());
    }
    Err(ValidationFailure::new(
        field,
        ValidationReason::TooLong {
            max,
            actual: value.chars().count(),
        },
    ))
}
