//! Domain model for project and task tracking.
//!
//! Projects own tasks; tasks carry a lifecycle status and an optional due
//! date. Aggregates stamp their own timestamps from an injected clock and
//! apply partial updates, while identifier generation and storage stay
//! outside the domain boundary.

mod entity;
mod error;
mod ids;
mod project;
mod status;
mod task;

pub use entity::{Entity, EntityKind};
pub use error::{
    Field, ParseTaskStatusError, ParseTransitionPolicyError, StatusTransitionError, ValidationFailure,
    ValidationReason,
};
pub use ids::{ProjectId, TaskId};
pub use project::{NewProject, PersistedProjectData, Project, ProjectPatch};
pub use status::{TaskStatus, TransitionPolicy};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
