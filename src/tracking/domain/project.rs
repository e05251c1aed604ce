//! Project aggregate and its draft and patch forms.

use super::{Entity, EntityKind, ProjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the project description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the supplied fields of `patch`, leaving omitted fields
    /// untouched.
    ///
    /// Returns `true` when the patch carried at least one field, in which
    /// case `updated_at` is refreshed.
    pub fn apply_patch(&mut self, patch: ProjectPatch, clock: &impl Clock) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.updated_at = clock.utc();
        true
    }

    /// Returns `true` when the title or description contains `needle`,
    /// ignoring case.
    #[must_use]
    pub fn matches_query(&self, needle: &str) -> bool {
        contains_ignore_case(&self.title, needle)
            || self
                .description
                .as_deref()
                .is_some_and(|description| contains_ignore_case(description, needle))
    }
}

impl Entity for Project {
    type Id = ProjectId;
    type Draft = NewProject;

    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> ProjectId {
        self.id
    }
}

/// Unsaved project awaiting an identifier from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewProject {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(title: impl Into<String>, description: Option<String>, clock: &impl Clock) -> Self {
        Self {
            title: title.into(),
            description,
            created_at: clock.utc(),
        }
    }

    /// Returns the draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the draft description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp, also used as the first `updated_at`.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Converts the draft into a stored project with the given identifier.
    #[must_use]
    pub fn into_project(self, id: ProjectId) -> Project {
        Project::from_persisted(PersistedProjectData {
            id,
            title: self.title,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.created_at,
        })
    }
}

/// Partial project update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

impl ProjectPatch {
    /// Returns `true` when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

pub(super) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
