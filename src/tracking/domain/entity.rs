//! Entity kinds shared by the generic repository contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Kind of tracked entity, used to label lookups and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A project record.
    Project,
    /// A task record.
    Task,
}

impl EntityKind {
    /// Returns the lowercase entity label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted aggregate addressable by a storage-generated identifier.
///
/// `Draft` is the unsaved form handed to the repository; the repository
/// assigns the identifier and returns the stored entity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type for this entity.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + Into<i64> + Send + Sync + 'static;

    /// Unsaved form of this entity.
    type Draft: Send + Sync + 'static;

    /// Kind label used in not-found failures.
    const KIND: EntityKind;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
