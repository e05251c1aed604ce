//! Error types for field validation and status parsing.

use super::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validated input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Project title.
    ProjectTitle,
    /// Project description.
    ProjectDescription,
    /// Task title.
    TaskTitle,
    /// Task description.
    TaskDescription,
}

impl Field {
    /// Returns the dotted field label used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectTitle => "project.title",
            Self::ProjectDescription => "project.description",
            Self::TaskTitle => "task.title",
            Self::TaskDescription => "task.description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationReason {
    /// The value is empty or whitespace only.
    #[error("must not be blank")]
    Blank,

    /// The value has more characters than allowed.
    #[error("must be at most {max} characters, got {actual}")]
    TooLong {
        /// Maximum permitted character count.
        max: usize,
        /// Character count of the rejected value.
        actual: usize,
    },
}

/// A rejected field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationFailure {
    /// Field that failed validation.
    pub field: Field,
    /// Why the value was rejected.
    pub reason: ValidationReason,
}

impl ValidationFailure {
    /// Creates a failure for the given field.
    #[must_use]
    pub const fn new(field: Field, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a transition policy from configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transition policy '{0}', expected permissive or strict")]
pub struct ParseTransitionPolicyError(pub String);

/// A status change rejected by the configured transition policy.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("task {task_id}: transition from '{from}' to '{to}' is not allowed")]
pub struct StatusTransitionError {
    /// Task whose status change was rejected.
    pub task_id: TaskId,
    /// Current status.
    pub from: TaskStatus,
    /// Requested status.
    pub to: TaskStatus,
}
