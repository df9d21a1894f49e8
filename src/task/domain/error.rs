//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted maximum length.
    #[error("task title exceeds {max} characters (got {len})")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Actual length of the rejected value.
        len: usize,
    },

    /// The task description exceeds the persisted maximum length.
    #[error("task description exceeds {max} characters (got {len})")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Actual length of the rejected value.
        len: usize,
    },

    /// The version counter is invalid.
    #[error("invalid version {0}, expected a positive integer")]
    InvalidVersion(u64),

    /// The requested status change violates the lifecycle state machine.
    #[error("task {task_id}: transition {from} -> {to} is not allowed")]
    InvalidStatusTransition {
        /// Identifier of the task being updated.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller requested.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses from storage or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing conditional-update tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid expected-version token '{0}', expected a positive integer")]
pub struct ParseExpectedVersionError(pub String);
