//! Service layer for task creation, editing, status changes and reads.

use crate::{
    access::{AccessControl, AccessDenied, Principal, ProjectCapability, TaskCapability},
    config::EngineConfig,
    error::ErrorKind,
    identity::{
        domain::{Email, IdentityDomainError},
        ports::{UserDirectory, UserDirectoryError},
        services::directory_error_kind,
    },
    project::{
        domain::{Project, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError},
        services::repository_error_kind,
    },
    task::{
        domain::{Assignee, Task, TaskDetails, TaskDomainError, TaskId, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError},
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    title: String,
    description: String,
    due_date: NaiveDate,
    assignee: String,
}

impl TaskRequest {
    /// Creates a request with the mandatory task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: NaiveDate, assignee: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date,
            assignee: assignee.into(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The task does not exist, or is not readable on a read path.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The project does not exist, or is not readable on a read path.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The access control engine refused the operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The assignee email failed validation.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),

    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl TaskServiceError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied(denied) => denied.kind(),
            Self::Domain(_) | Self::Identity(_) => ErrorKind::Validation,
            Self::Repository(err) => task_repository_error_kind(err),
            Self::ProjectRepository(err) => repository_error_kind(err),
            Self::Directory(err) => directory_error_kind(err),
        }
    }
}

/// Classifies a task repository failure; shared by services that load tasks.
pub(crate) const fn task_repository_error_kind(err: &TaskRepositoryError) -> ErrorKind {
    match err {
        TaskRepositoryError::NotFound(_) => ErrorKind::NotFound,
        TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::Persistence(_) => {
            ErrorKind::Persistence
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<T, P, D, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    directory: Arc<D>,
    clock: Arc<C>,
    config: EngineConfig,
    access: AccessControl,
}

impl<T, P, D, C> TaskService<T, P, D, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with the default configuration.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, directory: Arc<D>, clock: Arc<C>) -> Self {
        let config = EngineConfig::default();
        let access = AccessControl::from_config(&config);
        Self {
            tasks,
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

    /// Creates a pending task under an open project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does
    /// not exist, [`TaskServiceError::AccessDenied`] unless the principal
    /// owns the open project, and [`TaskServiceError::Domain`] when the
    /// details, due date or assignee fail validation.
    #[instrument(
        name = "taskboard.task.create",
        skip(self, principal, request),
        fields(principal = %principal.email())
    )]
    pub async fn create(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        request: TaskRequest,
    ) -> TaskServiceResult<Task> {
        let project = self.load_project(project_id).await?;
        self.authorize_project(principal, ProjectCapability::CreateTask, &project)?;

        let (details, assignee) = self.validate(request, &project).await?;
        let id = self.tasks.next_id().await?;
        let task = Task::new(id, project.id(), details, assignee, &*self.clock)?;
        self.tasks.store(&task).await?;

        info!(task_id = %task.id(), assignee = %task.assignee(), "created task");
        Ok(task)
    }

    /// Replaces details and assignee of a task under an open project.
    ///
    /// The assignee is checked against the project's collaborators as they
    /// are now.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::AccessDenied`] unless the principal owns the open
    /// project, and [`TaskServiceError::Domain`] when the details, due date
    /// or assignee fail validation.
    #[instrument(
        name = "taskboard.task.update",
        skip(self, principal, request),
        fields(principal = %principal.email())
    )]
    pub async fn update(
        &self,
        principal: &Principal,
        task_id: TaskId,
        request: TaskRequest,
    ) -> TaskServiceResult<Task> {
        let (mut task, project) = self.load_with_project(task_id).await?;
        self.authorize_task(principal, TaskCapability::Edit, &task, &project)?;

        let (details, assignee) = self.validate(request, &project).await?;
        task.edit(details, assignee, &*self.clock)?;
        self.tasks.update(&task).await?;

        info!(assignee = %task.assignee(), "updated task");
        Ok(task)
    }

    /// Deletes a task under an open project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// or [`TaskServiceError::AccessDenied`] unless the principal owns the
    /// open project.
    #[instrument(
        name = "taskboard.task.delete",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn delete(&self, principal: &Principal, task_id: TaskId) -> TaskServiceResult<()> {
        let (task, project) = self.load_with_project(task_id).await?;
        self.authorize_task(principal, TaskCapability::Delete, &task, &project)?;

        self.tasks.delete(task.id()).await?;

        info!("deleted task");
        Ok(())
    }

    /// Moves a task to `status`.
    ///
    /// The owning manager may pick any status, also on a closed project when
    /// the configured policy allows it. The assignee may only pick
    /// [`TaskStatus::Completed`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// or [`TaskServiceError::AccessDenied`] carrying the failed check.
    #[instrument(
        name = "taskboard.task.change_status",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn change_status(
        &self,
        principal: &Principal,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let (mut task, project) = self.load_with_project(task_id).await?;
        self.authorize_task(
            principal,
            TaskCapability::ChangeStatus { to: status },
            &task,
            &project,
        )?;

        let previous = task.status();
        task.set_status(status, &*self.clock);
        self.tasks.update(&task).await?;

        info!(%previous, %status, "changed task status");
        Ok(task)
    }

    /// Marks a task completed on behalf of its assigned collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// or [`TaskServiceError::AccessDenied`] unless the principal is the
    /// assigned collaborator and the project is open.
    #[instrument(
        name = "taskboard.task.mark_completed",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn mark_completed(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        let (mut task, project) = self.load_with_project(task_id).await?;
        self.authorize_task(principal, TaskCapability::Complete, &task, &project)?;

        task.set_status(TaskStatus::Completed, &*self.clock);
        self.tasks.update(&task).await?;

        info!("marked task completed");
        Ok(task)
    }

    /// Returns the task when the principal may read its project.
    ///
    /// Absence and lack of access both yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] or
    /// [`TaskServiceError::ProjectRepository`] when lookup fails.
    #[instrument(
        name = "taskboard.task.find_accessible",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn find_accessible(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> TaskServiceResult<Option<Task>> {
        let Some(task) = self.tasks.find_by_id(task_id).await? else {
            debug!("task not found");
            return Ok(None);
        };
        let readable = self.is_readable(principal, &task).await?;
        debug!(readable, "looked up accessible task");
        Ok(readable.then_some(task))
    }

    /// Returns the tasks of a project the principal may read, ordered by
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does
    /// not exist or the principal may not read it.
    #[instrument(
        name = "taskboard.task.list_for_project",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn list_for_project(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> TaskServiceResult<Vec<Task>> {
        let project = self.load_project(project_id).await?;
        if self
            .access
            .authorize_project(principal, ProjectCapability::Read, project.access())
            .is_err()
        {
            debug!("project not readable by principal");
            return Err(TaskServiceError::ProjectNotFound(project_id));
        }

        let tasks = self.tasks.find_by_project(project_id).await?;
        debug!(count = tasks.len(), "listed project tasks");
        Ok(tasks)
    }

    /// Returns the tasks assigned to the principal in projects they can
    /// still read, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] or
    /// [`TaskServiceError::ProjectRepository`] when lookup fails.
    #[instrument(
        name = "taskboard.task.list_assigned",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn list_assigned(&self, principal: &Principal) -> TaskServiceResult<Vec<Task>> {
        let assigned = self.tasks.find_by_assignee(principal.email()).await?;

        let mut readable_projects: BTreeMap<ProjectId, bool> = BTreeMap::new();
        let mut visible = Vec::with_capacity(assigned.len());
        for task in assigned {
            let readable = match readable_projects.get(&task.project_id()).copied() {
                Some(cached) => cached,
                None => {
                    let fresh = self.is_readable(principal, &task).await?;
                    readable_projects.insert(task.project_id(), fresh);
                    fresh
                }
            };
            if readable {
                visible.push(task);
            }
        }

        debug!(count = visible.len(), "listed assigned tasks");
        Ok(visible)
    }

    async fn validate(
        &self,
        request: TaskRequest,
        project: &Project,
    ) -> TaskServiceResult<(TaskDetails, Assignee)> {
        let TaskRequest {
            title,
            description,
            due_date,
            assignee: raw_assignee,
        } = request;

        let details = TaskDetails::new(title, description, due_date, &self.config.limits)?;
        let email = Email::new(raw_assignee)?;
        let account = self.directory.find_by_email(&email).await?;
        let assignee = Assignee::validate(&email, account.as_ref(), project)?;
        Ok((details, assignee))
    }

    async fn is_readable(&self, principal: &Principal, task: &Task) -> TaskServiceResult<bool> {
        let Some(project) = self.projects.find_by_id(task.project_id()).await? else {
            return Ok(false);
        };
        Ok(self
            .access
            .authorize_task(principal, TaskCapability::Read, task.access(project.access()))
            .is_ok())
    }

    async fn load_project(&self, project_id: ProjectId) -> TaskServiceResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(TaskServiceError::ProjectNotFound(project_id))
    }

    async fn load_with_project(&self, task_id: TaskId) -> TaskServiceResult<(Task, Project)> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))?;
        let project = self.load_project(task.project_id()).await?;
        Ok((task, project))
    }

    fn authorize_project(
        &self,
        principal: &Principal,
        capability: ProjectCapability,
        project: &Project,
    ) -> TaskServiceResult<()> {
        self.access
            .authorize_project(principal, capability, project.access())
            .inspect_err(|denied| {
                warn!(
                    project_id = %project.id(),
                    %capability,
                    reason = denied.reason().as_str(),
                    "task access denied"
                );
            })?;
        Ok(())
    }

    fn authorize_task(
        &self,
        principal: &Principal,
        capability: TaskCapability,
        task: &Task,
        project: &Project,
    ) -> TaskServiceResult<()> {
        self.access
            .authorize_task(principal, capability, task.access(project.access()))
            .inspect_err(|denied| {
                warn!(
                    task_id = %task.id(),
                    %capability,
                    reason = denied.reason().as_str(),
                    "task access denied"
                );
            })?;
        Ok(())
    }
}
