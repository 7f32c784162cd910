//! Borrowed resource views and the capabilities checked against them.

use crate::identity::domain::Email;
use crate::task::domain::TaskStatus;
use std::collections::BTreeSet;
use std::fmt;

/// The fields of a project that access decisions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectAccess<'a> {
    owner: &'a Email,
    collaborators: &'a BTreeSet<Email>,
    closed: bool,
}

impl<'a> ProjectAccess<'a> {
    /// Creates a project view.
    #[must_use]
    pub const fn new(owner: &'a Email, collaborators: &'a BTreeSet<Email>, closed: bool) -> Self {
        Self {
            owner,
            collaborators,
            closed,
        }
    }

    /// Returns the owning manager's email.
    #[must_use]
    pub const fn owner(&self) -> &'a Email {
        self.owner
    }

    /// Returns `true` when the project no longer accepts structural changes.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns `true` when `email` is the owner.
    #[must_use]
    pub fn is_owner(&self, email: &Email) -> bool {
        self.owner == email
    }

    /// Returns `true` when `email` is the owner or a collaborator.
    #[must_use]
    pub fn is_member(&self, email: &Email) -> bool {
        self.is_owner(email) || self.collaborators.contains(email)
    }
}

/// The fields of a task that access decisions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskAccess<'a> {
    project: ProjectAccess<'a>,
    assignee: &'a Email,
}

impl<'a> TaskAccess<'a> {
    /// Creates a task view under its parent project.
    #[must_use]
    pub const fn new(project: ProjectAccess<'a>, assignee: &'a Email) -> Self {
        Self { project, assignee }
    }

    /// Returns the parent project view.
    #[must_use]
    pub const fn project(&self) -> ProjectAccess<'a> {
        self.project
    }

    /// Returns the assignee's email.
    #[must_use]
    pub const fn assignee(&self) -> &'a Email {
        self.assignee
    }
}

/// Project-scoped capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectCapability {
    /// View the project and its tasks.
    Read,
    /// Change title or description.
    Edit,
    /// Mark the project closed.
    Close,
    /// Add or remove collaborators.
    InviteCollaborator,
    /// Create a task under the project.
    CreateTask,
}

impl ProjectCapability {
    /// Returns a stable identifier used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read_project",
            Self::Edit => "edit_project",
            Self::Close => "close_project",
            Self::InviteCollaborator => "invite_collaborator",
            Self::CreateTask => "create_task",
        }
    }
}

impl fmt::Display for ProjectCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task-scoped capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskCapability {
    /// View the task and its comments.
    Read,
    /// Change title, description, due date or assignee.
    Edit,
    /// Remove the task.
    Delete,
    /// Mark the task completed as its assignee.
    Complete,
    /// Move the task to an arbitrary status.
    ChangeStatus {
        /// Requested status.
        to: TaskStatus,
    },
    /// Append a comment.
    Comment,
}

impl TaskCapability {
    /// Returns a stable identifier used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read_task",
            Self::Edit => "edit_task",
            Self::Delete => "delete_task",
            Self::Complete => "complete_task",
            Self::ChangeStatus { .. } => "change_task_status",
            Self::Comment => "comment_on_task",
        }
    }
}

impl fmt::Display for TaskCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
