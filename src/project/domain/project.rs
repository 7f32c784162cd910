//! Project aggregate root.

use super::{ProjectDomainError, ProjectId};
use crate::access::ProjectAccess;
use crate::config::ValidationLimits;
use crate::identity::domain::{Email, Role, User};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Validated title and description of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    title: String,
    description: String,
}

impl ProjectDetails {
    /// Validates project details against the configured limits.
    ///
    /// Both values are trimmed; the description may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::TitleLength`] or
    /// [`ProjectDomainError::DescriptionTooLong`].
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        limits: &ValidationLimits,
    ) -> Result<Self, ProjectDomainError> {
        let trimmed_title = title.into().trim().to_owned();
        let title_length = trimmed_title.chars().count();
        if title_length < limits.min_project_title_length
            || title_length > limits.max_project_title_length
        {
            return Err(ProjectDomainError::TitleLength {
                min: limits.min_project_title_length,
                max: limits.max_project_title_length,
            });
        }

        let trimmed_description = description.into().trim().to_owned();
        if trimmed_description.chars().count() > limits.max_project_description_length {
            return Err(ProjectDomainError::DescriptionTooLong {
                max: limits.max_project_description_length,
            });
        }

        Ok(Self {
            title: trimmed_title,
            description: trimmed_description,
        })
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Project aggregate root.
///
/// The owner is a manager and never appears in the collaborator set. The
/// closed flag only moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    details: ProjectDetails,
    owner: Email,
    collaborators: BTreeSet<Email>,
    closed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates an open project with no collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::OwnerNotManager`] when `owner` is not a
    /// manager account.
    pub fn new(
        id: ProjectId,
        details: ProjectDetails,
        owner: &User,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        if owner.role() != Role::Manager {
            return Err(ProjectDomainError::OwnerNotManager(owner.email().clone()));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id,
            details,
            owner: owner.email().clone(),
            collaborators: BTreeSet::new(),
            closed: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the title and description.
    #[must_use]
    pub const fn details(&self) -> &ProjectDetails {
        &self.details
    }

    /// Returns the owning manager's email.
    #[must_use]
    pub const fn owner(&self) -> &Email {
        &self.owner
    }

    /// Returns the collaborator emails in ascending order.
    #[must_use]
    pub const fn collaborators(&self) -> &BTreeSet<Email> {
        &self.collaborators
    }

    /// Returns `true` once the project has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Builds the access view of this project.
    #[must_use]
    pub const fn access(&self) -> ProjectAccess<'_> {
        ProjectAccess::new(&self.owner, &self.collaborators, self.closed)
    }

    /// Returns `true` when `email` is in the collaborator set.
    #[must_use]
    pub fn has_collaborator(&self, email: &Email) -> bool {
        self.collaborators.contains(email)
    }

    /// Replaces title and description.
    pub fn edit(&mut self, details: ProjectDetails, clock: &impl Clock) {
        self.details = details;
        self.touch(clock);
    }

    /// Marks the project closed. Closing a closed project only refreshes the
    /// modification timestamp.
    pub fn close(&mut self, clock: &impl Clock) {
        self.closed = true;
        self.touch(clock);
    }

    /// Adds a collaborator account.
    ///
    /// Returns `false` when the account was already a collaborator; the
    /// project is then unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CollaboratorIsManager`] for manager
    /// accounts, which covers the owner.
    pub fn add_collaborator(
        &mut self,
        user: &User,
        clock: &impl Clock,
    ) -> Result<bool, ProjectDomainError> {
        if user.role() != Role::Collaborator {
            return Err(ProjectDomainError::CollaboratorIsManager(
                user.email().clone(),
            ));
        }
        let added = self.collaborators.insert(user.email().clone());
        if added {
            self.touch(clock);
        }
        Ok(added)
    }

    /// Removes a collaborator. Returns `false` when `email` was not one.
    pub fn remove_collaborator(&mut self, email: &Email, clock: &impl Clock) -> bool {
        let removed = self.collaborators.remove(email);
        if removed {
            self.touch(clock);
        }
        removed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
