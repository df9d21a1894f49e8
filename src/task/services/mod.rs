//! Application services for task orchestration.

mod tasks;

pub use tasks::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
