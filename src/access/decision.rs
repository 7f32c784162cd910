//! The capability table and its denial reasons.

use super::{Principal, ProjectAccess, ProjectCapability, TaskAccess, TaskCapability};
use crate::config::{ClosedProjectPolicy, EngineConfig};
use crate::error::ErrorKind;
use crate::identity::domain::Role;
use crate::task::domain::TaskStatus;
use thiserror::Error;

/// Why a capability was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialReason {
    /// The caller is not the owner or assignee the capability requires.
    NotOwner,
    /// The caller is neither owner nor collaborator of the project.
    NotMember,
    /// The caller's role cannot hold the capability.
    WrongRole,
    /// The project is closed.
    ProjectClosed,
}

impl DenialReason {
    /// Returns the stable reason tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotOwner => "not_owner",
            Self::NotMember => "not_member",
            Self::WrongRole => "wrong_role",
            Self::ProjectClosed => "project_closed",
        }
    }
}

/// A refused capability with a message suitable for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AccessDenied {
    reason: DenialReason,
    message: String,
}

impl AccessDenied {
    /// Creates a denial.
    #[must_use]
    pub fn new(reason: DenialReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }

    /// Returns the reason tag.
    #[must_use]
    pub const fn reason(&self) -> DenialReason {
        self.reason
    }

    /// Returns the display message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Classifies the denial.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self.reason {
            DenialReason::ProjectClosed => ErrorKind::ProjectClosed,
            DenialReason::NotOwner | DenialReason::NotMember | DenialReason::WrongRole => {
                ErrorKind::Unauthorized
            }
        }
    }

    fn not_owner(message: &str) -> Self {
        Self::new(DenialReason::NotOwner, message)
    }

    fn not_member() -> Self {
        Self::new(
            DenialReason::NotMember,
            "only the owner and collaborators may access this project",
        )
    }

    fn wrong_role(message: &str) -> Self {
        Self::new(DenialReason::WrongRole, message)
    }

    fn project_closed() -> Self {
        Self::new(DenialReason::ProjectClosed, "the project is closed")
    }
}

/// Result of an access decision.
pub type AccessResult = Result<(), AccessDenied>;

/// Returns `true` when the principal may read the project.
#[must_use]
pub fn can_access(principal: &Principal, project: ProjectAccess<'_>) -> bool {
    project.is_member(principal.email())
}

/// Decides capabilities for principals.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use taskboard::access::{AccessControl, Principal, ProjectAccess, ProjectCapability};
///
/// let owner = Principal::manager("m@x.com").expect("valid email");
/// let stranger = Principal::collaborator("s@x.com").expect("valid email");
/// let collaborators = BTreeSet::new();
/// let project = ProjectAccess::new(owner.email(), &collaborators, false);
///
/// let engine = AccessControl::default();
/// assert!(engine.authorize_project(&owner, ProjectCapability::Edit, project).is_ok());
/// assert!(engine.authorize_project(&stranger, ProjectCapability::Read, project).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessControl {
    closed_project_policy: ClosedProjectPolicy,
}

impl AccessControl {
    /// Creates an engine with an explicit closed-project policy.
    #[must_use]
    pub const fn new(closed_project_policy: ClosedProjectPolicy) -> Self {
        Self {
            closed_project_policy,
        }
    }

    /// Creates an engine from the engine configuration.
    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.closed_project_policy)
    }

    /// Decides whether the principal may create a project.
    ///
    /// # Errors
    ///
    /// Returns [`DenialReason::WrongRole`] unless the principal is a manager.
    pub fn authorize_create_project(&self, principal: &Principal) -> AccessResult {
        if principal.role() != Role::Manager {
            return Err(AccessDenied::wrong_role("only managers may create projects"));
        }
        Ok(())
    }

    /// Decides a project-scoped capability.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] carrying the first failed check.
    pub fn authorize_project(
        &self,
        principal: &Principal,
        capability: ProjectCapability,
        project: ProjectAccess<'_>,
    ) -> AccessResult {
        match capability {
            ProjectCapability::Read => require_member(principal, project),
            ProjectCapability::Edit => {
                require_member(principal, project)?;
                require_owner(principal, project)?;
                require_open(project)
            }
            ProjectCapability::Close => require_owner(principal, project),
            ProjectCapability::InviteCollaborator | ProjectCapability::CreateTask => {
                require_owner(principal, project)?;
                require_open(project)
            }
        }
    }

    /// Decides a task-scoped capability.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] carrying the first failed check.
    pub fn authorize_task(
        &self,
        principal: &Principal,
        capability: TaskCapability,
        task: TaskAccess<'_>,
    ) -> AccessResult {
        let project = task.project();
        match capability {
            TaskCapability::Read => require_member(principal, project),
            TaskCapability::Edit | TaskCapability::Delete => {
                require_owner(principal, project)?;
                require_open(project)
            }
            TaskCapability::Complete => {
                if principal.role() != Role::Collaborator {
                    return Err(AccessDenied::wrong_role(
                        "only collaborators may mark tasks as completed",
                    ));
                }
                require_open(project)?;
                require_assignee(principal, task)
            }
            TaskCapability::ChangeStatus { to } => self.authorize_status_change(principal, to, task),
            TaskCapability::Comment => {
                require_member(principal, project)?;
                require_open(project)
            }
        }
    }

    fn authorize_status_change(
        &self,
        principal: &Principal,
        to: TaskStatus,
        task: TaskAccess<'_>,
    ) -> AccessResult {
        let project = task.project();
        let owner_override = is_owning_manager(principal, project);
        let closure_waived =
            owner_override && self.closed_project_policy.owner_may_change_status();
        if project.is_closed() && !closure_waived {
            return Err(AccessDenied::project_closed());
        }
        if owner_override {
            return Ok(());
        }
        if principal.role() == Role::Collaborator && principal.email() == task.assignee() {
            if to == TaskStatus::Completed {
                return Ok(());
            }
            return Err(AccessDenied::wrong_role(
                "collaborators may only mark their tasks as completed",
            ));
        }
        Err(AccessDenied::not_owner(
            "only the project owner may change the status of this task",
        ))
    }
}

fn is_owning_manager(principal: &Principal, project: ProjectAccess<'_>) -> bool {
    principal.role() == Role::Manager && project.is_owner(principal.email())
}

fn require_member(principal: &Principal, project: ProjectAccess<'_>) -> AccessResult {
    if can_access(principal, project) {
        Ok(())
    } else {
        Err(AccessDenied::not_member())
    }
}

fn require_owner(principal: &Principal, project: ProjectAccess<'_>) -> AccessResult {
    if !project.is_owner(principal.email()) {
        return Err(AccessDenied::not_owner(
            "only the project owner may perform this action",
        ));
    }
    if principal.role() != Role::Manager {
        return Err(AccessDenied::wrong_role(
            "only managers may perform this action",
        ));
    }
    Ok(())
}

fn require_assignee(principal: &Principal, task: TaskAccess<'_>) -> AccessResult {
    if principal.email() == task.assignee() {
        Ok(())
    } else {
        Err(AccessDenied::not_owner(
            "only the assigned collaborator may complete this task",
        ))
    }
}

fn require_open(project: ProjectAccess<'_>) -> AccessResult {
    if project.is_closed() {
        return Err(AccessDenied::project_closed());
    }
    Ok(())
}
