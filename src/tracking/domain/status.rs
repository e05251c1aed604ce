//! Task lifecycle status and transition policy.

use super::{ParseTaskStatusError, ParseTransitionPolicyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is in progress.
    Doing,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Statuses that block project deletion.
    pub const ACTIVE: [Self; 2] = [Self::Todo, Self::Doing];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Returns `true` for `Todo` and `Doing`.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Todo | Self::Doing)
    }

    /// Returns whether a move from `self` to `next` is allowed under
    /// `policy`. Moving to the current status is never a transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self, policy: TransitionPolicy) -> bool {
        match policy {
            TransitionPolicy::Permissive => !matches!(
                (self, next),
                (Self::Todo, Self::Todo) | (Self::Doing, Self::Doing) | (Self::Done, Self::Done)
            ),
            TransitionPolicy::Strict => {
                matches!((self, next), (Self::Todo, Self::Doing) | (Self::Doing, Self::Done))
            }
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which status changes user-driven updates may perform.
///
/// The overdue sweep ignores the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may move to any other status.
    #[default]
    Permissive,
    /// Only `todo -> doing` and `doing -> done`.
    Strict,
}

impl TransitionPolicy {
    /// Returns the configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }
}

impl TryFrom<&str> for TransitionPolicy {
    type Error = ParseTransitionPolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            _ => Err(ParseTransitionPolicyError(value.to_owned())),
        }
    }
}
