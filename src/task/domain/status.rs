//! Task lifecycle status and the transition rules between statuses.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Created,
    /// Task is being worked on.
    InProgress,
    /// Task work has finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the lifecycle permits moving to `requested`.
    ///
    /// Identity moves are always permitted, so an update that does not
    /// change the status never fails this check. Otherwise only the
    /// forward moves `created -> in_progress`, `created -> completed`,
    /// and `in_progress -> completed` are legal.
    #[must_use]
    pub const fn can_transition_to(self, requested: Self) -> bool {
        matches!(
            (self, requested),
            (Self::Created, Self::Created)
                | (Self::Created, Self::InProgress)
                | (Self::Created, Self::Completed)
                | (Self::InProgress, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::Completed, Self::Completed)
        )
    }

    /// Returns whether no further status changes are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
