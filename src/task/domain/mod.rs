//! Domain model for tasks.
//!
//! A task belongs to exactly one project, is assigned to one of that
//! project's collaborators and moves between three statuses. Who may move it
//! is decided by [`crate::access`]; the aggregate itself only guards its
//! structural invariants.

mod assignment;
mod error;
mod ids;
mod status;
mod task;

pub use assignment::Assignee;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{Task, TaskDetails};
