//! Service layer exposing the task operation surface.
//!
//! Transport adapters (HTTP handlers and the like) call these operations
//! with raw, unvalidated input and translate the returned error kinds into
//! their own response codes. The service never logs and never retries;
//! every failure propagates to the caller as a distinct signal.

use crate::task::{
    domain::{
        ExpectedVersion, ParseExpectedVersionError, ParseTaskStatusError, Task, TaskDescription,
        TaskDomainError, TaskId, TaskPatch, TaskStatus, TaskTitle,
    },
    ports::{Page, TaskPage, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status; tasks start as `created` when omitted.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Request payload for partially updating a task.
///
/// Absent fields are left unchanged. `expected_version` carries the raw
/// conditional-update token exactly as received from the client; when it
/// is absent the update is unconditional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    expected_version: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            status: None,
            expected_version: None,
        }
    }

    /// Stages a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Stages a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stages a new lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Supplies the expected-version token for a conditional update.
    #[must_use]
    pub fn with_expected_version(mut self, token: impl Into<String>) -> Self {
        self.expected_version = Some(token.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed (field constraints or an illegal status
    /// transition).
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The supplied status value is outside the enumerated set.
    #[error(transparent)]
    UnknownStatus(#[from] ParseTaskStatusError),

    /// The conditional-update token is not a positive integer.
    #[error(transparent)]
    PreconditionMalformed(#[from] ParseExpectedVersionError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new task.
    ///
    /// The status defaults to `created` when the request omits it; the
    /// returned task carries the generated identifier and version 1.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when field validation fails, the
    /// status value is unknown, or the repository rejects persistence.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let description = request
            .description
            .map(TaskDescription::new)
            .transpose()?;
        let status = request
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?
            .unwrap_or(TaskStatus::Created);

        let task = Task::new(title, description, status, &*self.clock);
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when no task
    /// carries the identifier.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;
        Ok(task)
    }

    /// Lists tasks ordered by title ascending, with the unwindowed total.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the listing query
    /// fails; window bounds themselves never error.
    pub async fn list(&self, page: Page) -> TaskServiceResult<TaskPage> {
        Ok(self.repository.list(page).await?)
    }

    /// Applies a partial update, optionally guarded by an expected-version
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::PreconditionMalformed`] for an
    /// unparseable token, and wrapped repository errors for a missing
    /// task, a version mismatch, or an illegal status transition. A
    /// rejected update changes nothing.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let expected = request
            .expected_version
            .as_deref()
            .map(ExpectedVersion::parse)
            .transpose()?;

        let mut patch = TaskPatch::new();
        if let Some(raw_title) = request.title {
            patch = patch.with_title(TaskTitle::new(raw_title)?);
        }
        if let Some(raw_description) = request.description {
            patch = patch.with_description(TaskDescription::new(raw_description)?);
        }
        if let Some(raw_status) = request.status {
            patch = patch.with_status(TaskStatus::try_from(raw_status.as_str())?);
        }

        Ok(self.repository.update(id, patch, expected).await?)
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task
    /// does not exist; a second delete of the same identifier fails the
    /// same way rather than succeeding silently.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}
