//! Service-level failure taxonomy.

use crate::tracking::{
    domain::{EntityKind, ProjectId, StatusTransitionError, ValidationFailure},
    ports::RepositoryError,
};
use thiserror::Error;

/// Result type for tracking service operations.
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Caller-visible failures of project and task operations.
///
/// Every variant carries enough context to render a precise message without
/// re-querying storage. Repository integrity errors are folded into the
/// matching variant; only genuine storage failures surface as
/// [`TrackingError::Repository`].
#[derive(Debug, Error)]
pub enum TrackingError {
    /// The addressed entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of the missing entity.
        entity: EntityKind,
        /// Identifier that was looked up.
        id: i64,
    },

    /// Another project already uses the title.
    #[error("a project titled '{title}' already exists")]
    DuplicateTitle {
        /// Conflicting title.
        title: String,
    },

    /// A supplied field value was rejected.
    #[error(transparent)]
    ValidationFailure(#[from] ValidationFailure),

    /// The project still has `TODO` or `DOING` tasks.
    #[error("project {project_id} has {count} active tasks and cannot be deleted")]
    HasActiveTasks {
        /// Project whose deletion was refused.
        project_id: ProjectId,
        /// Number of active tasks.
        count: u64,
    },

    /// The project a task refers to does not exist.
    #[error("project not found: {project_id}")]
    ProjectNotFound {
        /// Missing project identifier.
        project_id: ProjectId,
    },

    /// The configured transition policy forbids the status change.
    #[error(transparent)]
    InvalidStatusTransition(#[from] StatusTransitionError),

    /// Storage failed for a reason unrelated to the request.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for TrackingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepositoryError::DuplicateTitle(title) => Self::DuplicateTitle { title },
            RepositoryError::MissingProject(project_id) => Self::ProjectNotFound { project_id },
            other @ (RepositoryError::InvalidPersistedData(_)
            | RepositoryError::Persistence(_)) => Self::Repository(other),
        }
    }
}

/// Transport-neutral classification of a failure.
///
/// Request handlers map this onto their own response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The addressed resource does not exist.
    NotFound,
    /// The request carried invalid or conflicting input.
    InvalidInput,
    /// The request conflicts with current state.
    Conflict,
    /// The failure is not the caller's fault.
    Internal,
}

impl FailureKind {
    /// Returns the conventional HTTP status code.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidInput => 400,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl TrackingError {
    /// Classifies the failure for request handlers.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } | Self::ProjectNotFound { .. } => FailureKind::NotFound,
            Self::DuplicateTitle { .. } | Self::ValidationFailure(_) => FailureKind::InvalidInput,
            Self::HasActiveTasks { .. } | Self::InvalidStatusTransition(_) => FailureKind::Conflict,
            Self::Repository(_) => FailureKind::Internal,
        }
    }
}
