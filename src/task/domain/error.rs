//! Error types for task domain validation and parsing.

use crate::identity::domain::Email;
use crate::project::domain::ProjectId;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or changing task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the configured limit.
    #[error("task title must be at most {max} characters")]
    TitleTooLong {
        /// Configured maximum.
        max: usize,
    },

    /// The description exceeds the configured limit.
    #[error("task description must be at most {max} characters")]
    DescriptionTooLong {
        /// Configured maximum.
        max: usize,
    },

    /// The due date lies before the current date.
    #[error("due date {due_date} is before today ({today})")]
    DueDateInPast {
        /// Requested due date.
        due_date: NaiveDate,
        /// Current date according to the clock.
        today: NaiveDate,
    },

    /// No account uses the assignee's email.
    #[error("no account exists for assignee {0}")]
    UnknownAssignee(Email),

    /// The assignee's account is not a collaborator account.
    #[error("assignee {0} is not a collaborator")]
    AssigneeNotCollaborator(Email),

    /// The assignee is not currently a collaborator of the project.
    #[error("assignee {assignee} is not a collaborator of project {project_id}")]
    AssigneeNotMember {
        /// Rejected assignee.
        assignee: Email,
        /// Parent project.
        project_id: ProjectId,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
