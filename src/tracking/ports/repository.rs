//! Generic repository port shared by every tracked entity.

use crate::tracking::domain::{Entity, EntityKind, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Offset/limit window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: u32,
    limit: u32,
}

impl Page {
    /// Default number of records per page.
    pub const DEFAULT_LIMIT: u32 = 100;

    /// Creates a page window.
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Returns the number of records to skip.
    #[must_use]
    pub const fn offset(self) -> u32 {
        self.offset
    }

    /// Returns the maximum number of records to return.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// CRUD contract every entity repository provides.
///
/// Entity-specific lookups live on capability traits layered on top of this
/// one ([`super::ProjectRepository`], [`super::TaskRepository`]).
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Finds an entity by identifier.
    ///
    /// Returns `None` when the entity does not exist.
    async fn find_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>>;

    /// Returns a page of entities in identifier (insertion) order.
    async fn list(&self, page: Page) -> RepositoryResult<Vec<E>>;

    /// Stores a draft, assigning a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns an integrity error ([`RepositoryError::DuplicateTitle`] or
    /// [`RepositoryError::MissingProject`]) when a storage constraint rejects
    /// the draft.
    async fn create(&self, draft: E::Draft) -> RepositoryResult<E>;

    /// Persists the full current state of an existing entity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the entity does not exist.
    async fn update(&self, entity: &E) -> RepositoryResult<()>;

    /// Deletes an entity, returning it as it was before deletion.
    ///
    /// Returns `None` when the entity does not exist.
    async fn delete(&self, id: E::Id) -> RepositoryResult<Option<E>>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of the missing entity.
        entity: EntityKind,
        /// Raw identifier that was looked up.
        id: i64,
    },

    /// The project title unique constraint rejected a write.
    #[error("duplicate project title: {0}")]
    DuplicateTitle(String),

    /// The task project foreign key rejected a write.
    #[error("referenced project does not exist: {0}")]
    MissingProject(ProjectId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Builds a not-found error for an entity identifier.
    pub fn not_found<E: Entity>(id: E::Id) -> Self {
        Self::NotFound {
            entity: E::KIND,
            id: id.into(),
        }
    }

    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
