//! Validation and transition rules.
//!
//! Pure predicates over proposed field values and current entity state,
//! parameterized by an explicit [`ValidationConfig`].

pub mod config;
pub mod rules;

pub use config::ValidationConfig;
pub use rules::{
    check_project_description, check_project_title, check_task_description, check_task_title,
    is_overdue, project_deletable, title_unique, transition_allowed, within_length,
};
