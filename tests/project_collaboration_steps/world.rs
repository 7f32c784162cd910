//! Shared world state for project collaboration BDD scenarios.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Days;
use eyre::WrapErr;
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use taskboard::access::Principal;
use taskboard::comment::{
    adapters::memory::InMemoryCommentRepository,
    domain::Comment,
    services::{CommentService, CommentServiceError},
};
use taskboard::error::ErrorKind;
use taskboard::identity::{
    adapters::memory::InMemoryUserDirectory,
    services::{IdentityService, RegisterManagerRequest},
};
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::Project,
    services::{InvitationService, NewCollaboratorDetails, ProjectService},
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskRequest, TaskService, TaskServiceError},
};

/// Task service wired to in-memory stores.
pub type WorldTaskService =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, InMemoryUserDirectory, DefaultClock>;

/// Scenario world for collaboration behaviour tests.
pub struct CollaborationWorld {
    directory: Arc<InMemoryUserDirectory>,
    projects: Arc<InMemoryProjectRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    comments: Arc<InMemoryCommentRepository>,
    clock: Arc<DefaultClock>,
    pub principals: BTreeMap<String, Principal>,
    pub manager: Option<Principal>,
    pub project: Option<Project>,
    pub task: Option<Task>,
    pub last_error: Option<ErrorKind>,
}

impl CollaborationWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directory: Arc::new(InMemoryUserDirectory::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            clock: Arc::new(DefaultClock),
            principals: BTreeMap::new(),
            manager: None,
            project: None,
            task: None,
            last_error: None,
        }
    }

    pub fn identity(&self) -> IdentityService<InMemoryUserDirectory, DefaultClock> {
        IdentityService::new(Arc::clone(&self.directory), Arc::clone(&self.clock))
    }

    pub fn project_service(
        &self,
    ) -> ProjectService<InMemoryProjectRepository, InMemoryUserDirectory, DefaultClock> {
        ProjectService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
    }

    pub fn invitation_service(
        &self,
    ) -> InvitationService<InMemoryProjectRepository, InMemoryUserDirectory, DefaultClock> {
        InvitationService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
    }

    pub fn task_service(&self) -> WorldTaskService {
        TaskService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
    }

    pub fn comment_service(
        &self,
    ) -> CommentService<
        InMemoryCommentRepository,
        InMemoryTaskRepository,
        InMemoryProjectRepository,
        DefaultClock,
    > {
        CommentService::new(
            Arc::clone(&self.comments),
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.clock),
        )
    }

    /// Returns the principal registered or invited under `email`.
    pub fn principal(&self, email: &str) -> eyre::Result<Principal> {
        self.principals
            .get(email)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no principal for {email} in scenario world"))
    }

    /// Returns the manager from the background.
    pub fn manager(&self) -> eyre::Result<Principal> {
        self.manager
            .clone()
            .ok_or_else(|| eyre::eyre!("missing manager in scenario world"))
    }

    /// Returns the project from the background.
    pub fn project(&self) -> eyre::Result<&Project> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the task created in the scenario.
    pub fn task(&self) -> eyre::Result<&Task> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Registers a manager account and remembers its principal.
    pub fn register_manager(&mut self, email: &str) -> eyre::Result<Principal> {
        let user = run_async(
            self.identity()
                .register_manager(RegisterManagerRequest::new(email, "Marta", "Ruiz", "hash")),
        )
        .wrap_err("register manager in scenario setup")?;
        let principal = Principal::from_user(&user);
        self.principals.insert(email.to_owned(), principal.clone());
        Ok(principal)
    }

    /// Invites `email` into the project on behalf of the manager.
    pub fn invite(&mut self, email: &str, name: &str, surname: &str) -> eyre::Result<()> {
        let manager = self.manager()?;
        let project_id = self.project()?.id();
        let invitation = run_async(self.invitation_service().invite(
            &manager,
            project_id,
            email,
            Some(NewCollaboratorDetails::new(name, surname)),
        ))
        .wrap_err("invite collaborator")?;
        self.principals
            .insert(email.to_owned(), Principal::from_user(invitation.collaborator()));
        self.project = Some(invitation.project().clone());
        Ok(())
    }

    /// Creates a task due `days` from today on behalf of the manager.
    pub fn assign_task(&mut self, title: &str, email: &str, days: u64) -> eyre::Result<()> {
        let task = self
            .try_assign_task(title, email, days)?
            .wrap_err("create task")?;
        self.task = Some(task);
        Ok(())
    }

    /// Attempts to create a task, handing back the service outcome.
    pub fn try_assign_task(
        &self,
        title: &str,
        email: &str,
        days: u64,
    ) -> eyre::Result<Result<Task, TaskServiceError>> {
        let manager = self.manager()?;
        let project_id = self.project()?.id();
        let due_date = self
            .clock
            .utc()
            .date_naive()
            .checked_add_days(Days::new(days))
            .ok_or_else(|| eyre::eyre!("due date out of range"))?;
        Ok(run_async(self.task_service().create(
            &manager,
            project_id,
            TaskRequest::new(title, due_date, email),
        )))
    }

    /// Adds a comment to the scenario task as `email`.
    pub fn comment(
        &self,
        email: &str,
        content: &str,
    ) -> eyre::Result<Result<Comment, CommentServiceError>> {
        let author = self.principal(email)?;
        let task_id = self.task()?.id();
        Ok(run_async(
            self.comment_service().add(&author, task_id, content),
        ))
    }
}

impl Default for CollaborationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CollaborationWorld {
    CollaborationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
