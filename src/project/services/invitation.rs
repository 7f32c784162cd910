//! Collaborator invitation workflow.

use super::store::repository_error_kind;
use crate::{
    access::{AccessControl, AccessDenied, Principal, ProjectCapability},
    config::EngineConfig,
    error::ErrorKind,
    identity::{
        domain::{Email, IdentityDomainError, Role, User, UserProfile},
        ports::{UserDirectory, UserDirectoryError},
        services::directory_error_kind,
    },
    project::{
        domain::{Project, ProjectDomainError, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Identity fields required to provision an account for a new invitee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollaboratorDetails {
    name: String,
    surname: String,
    phone: Option<String>,
}

impl NewCollaboratorDetails {
    /// Creates details with the mandatory name fields.
    #[must_use]
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            phone: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// How an invitation resolved the invitee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvitationOutcome {
    /// A collaborator account was provisioned without a credential.
    AccountCreated,
    /// An existing collaborator account joined the project.
    ExistingAccountAdded,
    /// The invitee was already a collaborator; nothing changed.
    AlreadyMember,
}

/// Result of a successful invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    project: Project,
    collaborator: User,
    outcome: InvitationOutcome,
}

impl Invitation {
    /// Returns the project as persisted after the invitation.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the invitee's account, existing or newly created.
    #[must_use]
    pub const fn collaborator(&self) -> &User {
        &self.collaborator
    }

    /// Returns how the invitee was resolved.
    #[must_use]
    pub const fn outcome(&self) -> InvitationOutcome {
        self.outcome
    }
}

/// Errors returned by the invitation workflow.
#[derive(Debug, Error)]
pub enum InvitationError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The access control engine refused the operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// The invitee's account is a manager account.
    #[error("{0} is a manager and cannot be invited as a collaborator")]
    AlreadyManager(Email),

    /// No account exists and no identity fields were supplied.
    #[error("name and surname are required to create an account for {0}")]
    MissingAccountDetails(Email),

    /// Invitee email or identity fields failed validation.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// Project invariant violated.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl InvitationError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied(denied) => denied.kind(),
            Self::AlreadyManager(_)
            | Self::MissingAccountDetails(_)
            | Self::Identity(_)
            | Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => repository_error_kind(err),
            Self::Directory(err) => directory_error_kind(err),
        }
    }
}

/// Result type for invitation operations.
pub type InvitationResult<T> = Result<T, InvitationError>;

/// Membership management for project owners.
#[derive(Clone)]
pub struct InvitationService<P, D, C>
where
    P: ProjectRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: EngineConfig,
    access: AccessControl,
}

impl<P, D, C> InvitationService<P, D, C>
where
    P: ProjectRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new invitation service with the default configuration.
    #[must_use]
    pub fn new(projects: Arc<P>, directory: Arc<D>, clock: Arc<C>) -> Self {
        let config = EngineConfig::default();
        let access = AccessControl::from_config(&config);
        Self {
            projects,
            directory,
            clock,
            config,
            access,
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.access = AccessControl::from_config(&config);
        self.config = config;
        self
    }

    /// Adds `email` to the project's collaborators, provisioning a
    /// collaborator account without a credential when none exists.
    ///
    /// Every check runs before the first write. When an account is created,
    /// it is stored before the project is updated and deleted again if the
    /// project update fails. Inviting a current collaborator succeeds
    /// without changes.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::NotFound`] when the project does not
    /// exist, [`InvitationError::AccessDenied`] unless the principal owns the
    /// open project, [`InvitationError::AlreadyManager`] for manager
    /// accounts, and [`InvitationError::MissingAccountDetails`] when a new
    /// account is needed but `details` is `None`.
    #[instrument(
        name = "taskboard.project.invite",
        skip(self, principal, details),
        fields(principal = %principal.email())
    )]
    pub async fn invite(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        email: &str,
        details: Option<NewCollaboratorDetails>,
    ) -> InvitationResult<Invitation> {
        let mut project = self.load(project_id).await?;
        self.authorize(principal, &project)?;
        let invitee = Email::new(email)?;

        let (collaborator, created) = match self.directory.find_by_email(&invitee).await? {
            Some(existing) => (existing, false),
            None => (self.provisional_account(&invitee, details).await?, true),
        };
        if collaborator.role() == Role::Manager {
            return Err(InvitationError::AlreadyManager(invitee));
        }

        let added = project.add_collaborator(&collaborator, &*self.clock)?;
        if !added {
            info!(collaborator = %invitee, "invitee is already a collaborator");
            return Ok(Invitation {
                project,
                collaborator,
                outcome: InvitationOutcome::AlreadyMember,
            });
        }

        if created {
            self.directory.create(&collaborator).await?;
        }
        if let Err(err) = self.projects.update(&project).await {
            if created {
                self.discard_account(&invitee).await;
            }
            return Err(err.into());
        }

        let outcome = if created {
            InvitationOutcome::AccountCreated
        } else {
            InvitationOutcome::ExistingAccountAdded
        };
        info!(collaborator = %invitee, ?outcome, "added collaborator");
        Ok(Invitation {
            project,
            collaborator,
            outcome,
        })
    }

    /// Removes `email` from the project's collaborators.
    ///
    /// Tasks already assigned to the removed collaborator keep their
    /// assignee; editing such a task requires a new assignee. Removing a
    /// non-member succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationError::NotFound`] when the project does not
    /// exist, or [`InvitationError::AccessDenied`] unless the principal owns
    /// the open project.
    #[instrument(
        name = "taskboard.project.remove_collaborator",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn remove_collaborator(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        email: &str,
    ) -> InvitationResult<Project> {
        let mut project = self.load(project_id).await?;
        self.authorize(principal, &project)?;
        let member = Email::new(email)?;

        if project.remove_collaborator(&member, &*self.clock) {
            self.projects.update(&project).await?;
            info!(collaborator = %member, "removed collaborator");
        }
        Ok(project)
    }

    /// Builds, without storing, the account for an invitee that has none.
    async fn provisional_account(
        &self,
        invitee: &Email,
        details: Option<NewCollaboratorDetails>,
    ) -> InvitationResult<User> {
        let Some(NewCollaboratorDetails {
            name,
            surname,
            phone,
        }) = details
        else {
            return Err(InvitationError::MissingAccountDetails(invitee.clone()));
        };

        let limits = &self.config.limits;
        let profile = UserProfile::new(name, surname, limits)?.with_phone(phone, limits)?;
        let id = self.directory.next_id().await?;
        Ok(User::new(
            id,
            invitee.clone(),
            profile,
            Role::Collaborator,
            &*self.clock,
        ))
    }

    /// Deletes an account provisioned by an invitation that did not complete.
    async fn discard_account(&self, invitee: &Email) {
        match self.directory.remove(invitee).await {
            Ok(()) => warn!(collaborator = %invitee, "discarded account of failed invitation"),
            Err(err) => warn!(
                collaborator = %invitee,
                error = %err,
                "failed to discard account of failed invitation"
            ),
        }
    }

    async fn load(&self, project_id: ProjectId) -> InvitationResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(InvitationError::NotFound(project_id))
    }

    fn authorize(&self, principal: &Principal, project: &Project) -> InvitationResult<()> {
        self.access
            .authorize_project(
                principal,
                ProjectCapability::InviteCollaborator,
                project.access(),
            )
            .inspect_err(|denied| {
                warn!(
                    project_id = %project.id(),
                    principal = %principal.email(),
                    reason = denied.reason().as_str(),
                    "membership change denied"
                );
            })?;
        Ok(())
    }
}
