//! Domain model for task records and their lifecycle.
//!
//! The task domain models validated task fields, lifecycle status
//! transitions, partial-update patches, and per-record version counters
//! while keeping all infrastructure concerns outside of the domain
//! boundary.

mod error;
mod ids;
mod status;
mod task;
mod version;

pub use error::{ParseExpectedVersionError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskDescription, TaskId, TaskTitle};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskPatch};
pub use version::{ExpectedVersion, Version};
