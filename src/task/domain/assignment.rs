//! Assignee validation.

use super::TaskDomainError;
use crate::identity::domain::{Email, Role, User};
use crate::project::domain::Project;

/// An email proven assignable in a project at the time of validation.
///
/// Construction checks the account and the project's current collaborator
/// set, so a task can only be created or edited with a fresh check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignee(Email);

impl Assignee {
    /// Validates `email` as an assignee for tasks of `project`.
    ///
    /// `account` is the directory record for `email`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownAssignee`] when no account exists,
    /// [`TaskDomainError::AssigneeNotCollaborator`] when the account is a
    /// manager, and [`TaskDomainError::AssigneeNotMember`] when the account
    /// is not in the project's collaborator set.
    pub fn validate(
        email: &Email,
        account: Option<&User>,
        project: &Project,
    ) -> Result<Self, TaskDomainError> {
        let Some(user) = account else {
            return Err(TaskDomainError::UnknownAssignee(email.clone()));
        };
        if user.role() != Role::Collaborator {
            return Err(TaskDomainError::AssigneeNotCollaborator(email.clone()));
        }
        if !project.has_collaborator(email) {
            return Err(TaskDomainError::AssigneeNotMember {
                assignee: email.clone(),
                project_id: project.id(),
            });
        }
        Ok(Self(user.email().clone()))
    }

    /// Returns the validated email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.0
    }

    /// Consumes the assignee, returning the email.
    #[must_use]
    pub fn into_email(self) -> Email {
        self.0
    }
}
