//! Task aggregate root and the partial-update patch applied to it.

use super::{TaskDescription, TaskDomainError, TaskId, TaskStatus, TaskTitle, Version};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: Version,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted version counter.
    pub version: Version,
}

impl Task {
    /// Creates a new task with a generated identifier.
    ///
    /// The task starts at [`Version::INITIAL`] with matching creation and
    /// update timestamps.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: Option<TaskDescription>,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title,
            description,
            status,
            created_at: timestamp,
            updated_at: timestamp,
            version: Version::INITIAL,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the version counter.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the entity tag surfaced to clients: the decimal version.
    #[must_use]
    pub fn entity_tag(&self) -> String {
        self.version.to_string()
    }

    /// Applies a partial update in a single atomic step.
    ///
    /// Fields absent from the patch keep their current value; in
    /// particular an absent description means "no change", never "clear".
    /// Validation runs before any field is written, so a rejected patch
    /// leaves the task untouched. Every accepted patch, including an empty
    /// one, increments the version by 1 and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the
    /// patch requests a status move the lifecycle state machine forbids.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if let Some(requested) = patch.status {
            if !self.status.can_transition_to(requested) {
                return Err(TaskDomainError::InvalidStatusTransition {
                    task_id: self.id,
                    from: self.status,
                    to: requested,
                });
            }
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.version = self.version.incremented();
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Partial update for a task.
///
/// Each field is independently optional; absence means "leave unchanged".
/// There is no way to clear a description through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<TaskDescription>,
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            status: None,
        }
    }

    /// Stages a new title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Stages a new description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Stages a new lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}
