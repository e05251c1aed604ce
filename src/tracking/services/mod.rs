//! Application services orchestrating validation and persistence.

mod error;
mod project;
mod sweep;
mod task;

pub use error::{FailureKind, TrackingError, TrackingResult};
pub use project::{CreateProjectRequest, ProjectService, UpdateProjectRequest};
pub use sweep::{MIN_SWEEP_INTERVAL, OverdueSweeper, SweepReport, cancel_on_signal};
pub use task::{CreateTaskRequest, TaskService, UpdateTaskRequest};
