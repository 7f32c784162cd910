//! Appending to and reading a task's comment log.

use crate::{
    access::{AccessControl, AccessDenied, Principal, TaskCapability},
    comment::{
        domain::{Comment, CommentContent, CommentDomainError},
        ports::{CommentRepository, CommentRepositoryError},
    },
    config::EngineConfig,
    error::ErrorKind,
    project::{
        domain::Project,
        ports::{ProjectRepository, ProjectRepositoryError},
        services::repository_error_kind,
    },
    task::{
        domain::{Task, TaskId},
        ports::{TaskRepository, TaskRepositoryError},
        services::task_repository_error_kind,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// The task does not exist, or is not readable on a read path.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The access control engine refused the operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Content validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),

    /// Comment repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),

    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),

    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
}

impl CommentServiceError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::AccessDenied(denied) => denied.kind(),
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(_) => ErrorKind::Persistence,
            Self::TaskRepository(err) => task_repository_error_kind(err),
            Self::ProjectRepository(err) => repository_error_kind(err),
        }
    }
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment log service.
#[derive(Clone)]
pub struct CommentService<M, T, P, C>
where
    M: CommentRepository,
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    comments: Arc<M>,
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
    config: EngineConfig,
    access: AccessControl,
}

impl<M, T, P, C> CommentService<M, T, P, C>
where
    M: CommentRepository,
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service with the default configuration.
    #[must_use]
    pub fn new(comments: Arc<M>, tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        let config = EngineConfig::default();
        let access = AccessControl::from_config(&config);
        Self {
            comments,
            tasks,
            projects,
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

    /// Appends a comment to a task of an open project.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::TaskNotFound`] when the task does not
    /// exist, [`CommentServiceError::AccessDenied`] unless the principal is
    /// a member of the open project, and [`CommentServiceError::Domain`] for
    /// blank or overlong content.
    #[instrument(
        name = "taskboard.comment.add",
        skip(self, principal, content),
        fields(principal = %principal.email())
    )]
    pub async fn add(
        &self,
        principal: &Principal,
        task_id: TaskId,
        content: &str,
    ) -> CommentServiceResult<Comment> {
        let (task, project) = self.load(task_id).await?;
        self.access
            .authorize_task(principal, TaskCapability::Comment, task.access(project.access()))
            .inspect_err(|denied| {
                warn!(
                    reason = denied.reason().as_str(),
                    "comment denied"
                );
            })?;

        let text = CommentContent::new(content, &self.config.limits)?;
        let id = self.comments.next_id().await?;
        let comment = Comment::new(id, task.id(), principal.email().clone(), text, &*self.clock);
        self.comments.store(&comment).await?;

        info!(comment_id = %comment.id(), "added comment");
        Ok(comment)
    }

    /// Returns a task's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::TaskNotFound`] when the task does not
    /// exist or the principal may not read it.
    #[instrument(
        name = "taskboard.comment.list_for_task",
        skip(self, principal),
        fields(principal = %principal.email())
    )]
    pub async fn list_for_task(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> CommentServiceResult<Vec<Comment>> {
        let (task, project) = self.load(task_id).await?;
        if self
            .access
            .authorize_task(principal, TaskCapability::Read, task.access(project.access()))
            .is_err()
        {
            debug!("task not readable by principal");
            return Err(CommentServiceError::TaskNotFound(task_id));
        }

        let comments = self.comments.find_by_task(task_id).await?;
        debug!(count = comments.len(), "listed comments");
        Ok(comments)
    }

    async fn load(&self, task_id: TaskId) -> CommentServiceResult<(Task, Project)> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(CommentServiceError::TaskNotFound(task_id))?;
        let project = self
            .projects
            .find_by_id(task.project_id())
            .await?
            .ok_or(CommentServiceError::TaskNotFound(task_id))?;
        Ok((task, project))
    }
}
