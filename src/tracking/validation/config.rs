//! Validation limits and transition policy.

use crate::tracking::domain::TransitionPolicy;

/// Configuration for validation rules, passed into services at construction.
///
/// Limits count characters, not bytes or words, and match the column widths
/// of the `projects` and `tasks` tables.
///
/// # Examples
///
/// ```
/// use taskboard::tracking::{domain::TransitionPolicy, validation::ValidationConfig};
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.project_title_max_chars, 50);
/// assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
///
/// let strict = ValidationConfig::strict();
/// assert_eq!(strict.transition_policy, TransitionPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Maximum project title length in characters.
    pub project_title_max_chars: usize,
    /// Maximum project description length in characters.
    pub project_description_max_chars: usize,
    /// Maximum task title length in characters.
    pub task_title_max_chars: usize,
    /// Maximum task description length in characters.
    pub task_description_max_chars: usize,
    /// Status changes permitted for user-driven updates.
    pub transition_policy: TransitionPolicy,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            project_title_max_chars: 50,
            project_description_max_chars: 100,
            task_title_max_chars: 80,
            task_description_max_chars: 300,
            transition_policy: TransitionPolicy::Permissive,
        }
    }
}

impl ValidationConfig {
    /// Creates the default limits with forward-only status transitions.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            transition_policy: TransitionPolicy::Strict,
            ..Self::default()
        }
    }

    /// Replaces the transition policy.
    #[must_use]
    pub const fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }
}
