//! Port contracts for project and task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by tracking services.

pub mod project;
pub mod repository;
pub mod task;

pub use project::{ProjectRemoval, ProjectRepository};
pub use repository::{Page, Repository, RepositoryError, RepositoryResult};
pub use task::{TaskFilter, TaskRepository};
