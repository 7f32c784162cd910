//! Application services for task orchestration.

mod lifecycle;

pub(crate) use lifecycle::task_repository_error_kind;
pub use lifecycle::{TaskRequest, TaskService, TaskServiceError, TaskServiceResult};
