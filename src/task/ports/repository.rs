//! Repository port for task persistence, listing, and conditional updates.

use crate::task::domain::{ExpectedVersion, Task, TaskDomainError, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Pagination window over the task collection.
///
/// Construction clamps the bounds so listing can never fail on them: the
/// offset type rules out negative values and the limit is forced into
/// `[1, MAX_LIMIT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: u64,
    limit: u64,
}

impl Page {
    /// Number of items per page when the caller does not pick one.
    pub const DEFAULT_LIMIT: u64 = 100;

    /// Largest permitted page size.
    pub const MAX_LIMIT: u64 = 1000;

    /// Creates a window, clamping `limit` into `[1, MAX_LIMIT]`.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        let clamped = if limit < 1 {
            1
        } else if limit > Self::MAX_LIMIT {
            Self::MAX_LIMIT
        } else {
            limit
        };
        Self {
            offset,
            limit: clamped,
        }
    }

    /// Returns the number of leading items skipped.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.offset
    }

    /// Returns the maximum number of items returned.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// One window of tasks plus the unwindowed total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// Tasks in the window, ordered by title then identifier.
    pub items: Vec<Task>,
    /// Total number of stored tasks, ignoring the window.
    pub total: u64,
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks ordered by title ascending, ties broken by identifier.
    ///
    /// The returned total counts every stored task regardless of the
    /// window. Out-of-range windows yield an empty item list, never an
    /// error.
    async fn list(&self, page: Page) -> TaskRepositoryResult<TaskPage>;

    /// Applies a partial update to a stored task.
    ///
    /// The fetch, version check, transition validation, and write are
    /// evaluated against one consistent snapshot of the task: concurrent
    /// updates to the same task serialize, and of two updates presenting
    /// the same expected version at most one succeeds. Passing `None` for
    /// `expected` makes the update unconditional (last writer wins).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, [`TaskRepositoryError::VersionMismatch`] when `expected`
    /// does not equal the stored version, and a wrapped
    /// [`TaskDomainError`] when the staged status change is illegal. On
    /// any error nothing is written and the version does not advance.
    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        expected: Option<ExpectedVersion>,
    ) -> TaskRepositoryResult<Task>;

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, including on a repeated delete of the same identifier.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The caller's expected version does not match the stored version.
    #[error("version mismatch: expected {expected}, current version is {actual}")]
    VersionMismatch {
        /// Version the caller asserted.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// Domain validation rejected the staged update.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
