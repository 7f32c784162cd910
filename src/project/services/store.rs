//! Project creation, editing, closure and scoped reads.

use crate::{
    access::{AccessControl, AccessDenied, Principal, ProjectCapability},
    config::EngineConfig,
    error::ErrorKind,
    identity::{
        ports::{UserDirectory, UserDirectoryError},
        services::directory_error_kind,
    },
    project::{
        domain::{Project, ProjectDetails, ProjectDomainError, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating or editing a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    title: String,
    description: String,
}

impl ProjectRequest {
    /// Creates a request with a title and an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The access control engine refused the operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl ProjectServiceError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied(denied) => denied.kind(),
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) => repository_error_kind(err),
            Self::Directory(err) => directory_error_kind(err),
        }
    }
}

/// Classifies a project repository failure; shared by services that load
/// projects.
pub(crate) const fn repository_error_kind(err: &ProjectRepositoryError) -> ErrorKind {
    match err {
        ProjectRepositoryError::NotFound(_) => ErrorKind::NotFound,
        ProjectRepositoryError::DuplicateProject(_) | ProjectRepositoryError::Persistence(_) => {
            ErrorKind::Persistence
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, D, C>
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

impl<P, D, C> ProjectService<P, D, C>
where
    P: ProjectRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new project service with the default configuration.
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

    /// Creates an open project owned by the principal.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::AccessDenied`] unless the principal is
    /// a manager, [`ProjectServiceError::Directory`] when the principal has
    /// no account, and [`ProjectServiceError::Domain`] when the title or
    /// description fails validation.
    #[instrument(
        name = "taskboard.project.create",
        skip(self, principal, request),
        fields(principal = %principal.email())
    )]
    pub async fn create(
        &self,
        principal: &Principal,
        request: ProjectRequest,
    ) -> ProjectServiceResult<Project> {
        self.authorize_create(principal)?;
        let owner = self
            .directory
            .find_by_email(principal.email())
            .await?
            .ok_or_else(|| UserDirectoryError::NotFound(principal.email().clone()))?;
        self.authorize_create(&Principal::from_user(&owner))?;

        let details =
            ProjectDetails::new(request.title, request.description, &self.config.limits)?;
        let id = self.projects.next_id().await?;
        let project = Project::new(id, details, &owner, &*self.clock)?;
        self.projects.store(&project).await?;

        info!(project_id = %project.id(), "created project");
        Ok(project)
    }

    /// Replaces the title and description of an open project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist, [`ProjectServiceError::AccessDenied`] unless the principal owns
    /// the open project, and [`ProjectServiceError::Domain`] when the new
    /// values fail validation.
    #[instrument(
        name = "taskboard.project.update",
        skip(self, principal, request),
        fields(principal = %principal.email())
    )]
    pub async fn update(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        request: ProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.load(project_id).await?;
        self.authorize(principal, ProjectCapability::Edit, &project)?;

        let details =
            ProjectDetails::new(request.title, request.description, &self.config.limits)?;
        project.edit(details, &*self.clock);
        self.projects.update(&project).await?;

        info!("updated project details");
        Ok(project)
    }

    /// Closes a project. Closing an already closed project succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist, or [`ProjectServiceError::AccessDenied`] unless the principal
    /// owns it.
    #[instrument(
        name = "taskboard.project.close",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn close(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.load(project_id).await?;
        self.authorize(principal, ProjectCapability::Close, &project)?;

        let was_closed = project.is_closed();
        project.close(&*self.clock);
        self.projects.update(&project).await?;

        info!(was_closed, "closed project");
        Ok(project)
    }

    /// Returns the project when the principal may read it.
    ///
    /// Absence and lack of access both yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    #[instrument(
        name = "taskboard.project.find_accessible",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn find_accessible(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Option<Project>> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .filter(|project| {
                self.access
                    .authorize_project(principal, ProjectCapability::Read, project.access())
                    .is_ok()
            });
        debug!(found = project.is_some(), "looked up accessible project");
        Ok(project)
    }

    /// Returns `true` when the project exists and the principal may read it.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn can_access(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> ProjectServiceResult<bool> {
        Ok(self.find_accessible(principal, project_id).await?.is_some())
    }

    /// Returns the projects the principal owns, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_owned(&self, principal: &Principal) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.find_by_owner(principal.email()).await?)
    }

    /// Returns the projects the principal collaborates on, ordered by
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_collaborating(
        &self,
        principal: &Principal,
    ) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.find_by_collaborator(principal.email()).await?)
    }

    /// Returns every project the principal may read, without duplicates and
    /// ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    #[instrument(
        name = "taskboard.project.list_accessible",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn list_accessible(
        &self,
        principal: &Principal,
    ) -> ProjectServiceResult<Vec<Project>> {
        let owned = self.list_owned(principal).await?;
        let collaborating = self.list_collaborating(principal).await?;

        let merged: BTreeMap<ProjectId, Project> = owned
            .into_iter()
            .chain(collaborating)
            .map(|project| (project.id(), project))
            .collect();

        debug!(count = merged.len(), "listed accessible projects");
        Ok(merged.into_values().collect())
    }

    async fn load(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::NotFound(project_id))
    }

    fn authorize_create(&self, principal: &Principal) -> ProjectServiceResult<()> {
        self.access
            .authorize_create_project(principal)
            .inspect_err(|denied| {
                warn!(
                    principal = %principal.email(),
                    reason = denied.reason().as_str(),
                    "project creation denied"
                );
            })?;
        Ok(())
    }

    fn authorize(
        &self,
        principal: &Principal,
        capability: ProjectCapability,
        project: &Project,
    ) -> ProjectServiceResult<()> {
        self.access
            .authorize_project(principal, capability, project.access())
            .inspect_err(|denied| {
                warn!(
                    project_id = %project.id(),
                    principal = %principal.email(),
                    %capability,
                    reason = denied.reason().as_str(),
                    "project access denied"
                );
            })?;
        Ok(())
    }
}
