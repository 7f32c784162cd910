//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use taskboard::access::Principal;
use taskboard::comment::{adapters::memory::InMemoryCommentRepository, services::CommentService};
use taskboard::config::EngineConfig;
use taskboard::identity::{
    adapters::memory::InMemoryUserDirectory,
    services::{IdentityService, RegisterManagerRequest},
};
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::Project,
    services::{InvitationService, NewCollaboratorDetails, ProjectRequest, ProjectService},
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskRequest, TaskService},
};

/// Project service wired to the shared stores.
pub type Projects = ProjectService<InMemoryProjectRepository, InMemoryUserDirectory, DefaultClock>;
/// Invitation service wired to the shared stores.
pub type Invitations =
    InvitationService<InMemoryProjectRepository, InMemoryUserDirectory, DefaultClock>;
/// Task service wired to the shared stores.
pub type Tasks =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, InMemoryUserDirectory, DefaultClock>;
/// Comment service wired to the shared stores.
pub type Comments = CommentService<
    InMemoryCommentRepository,
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    DefaultClock,
>;

/// One set of in-memory stores shared by every service.
#[derive(Clone)]
pub struct Stores {
    directory: Arc<InMemoryUserDirectory>,
    projects: Arc<InMemoryProjectRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    comments: Arc<InMemoryCommentRepository>,
    clock: Arc<DefaultClock>,
    config: EngineConfig,
}

impl Stores {
    /// Creates empty stores using the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            directory: Arc::new(InMemoryUserDirectory::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            clock: Arc::new(DefaultClock),
            config,
        }
    }

    pub fn identity(&self) -> IdentityService<InMemoryUserDirectory, DefaultClock> {
        IdentityService::new(Arc::clone(&self.directory), Arc::clone(&self.clock))
            .with_config(self.config.clone())
    }

    pub fn projects(&self) -> Projects {
        ProjectService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
        .with_config(self.config.clone())
    }

    pub fn invitations(&self) -> Invitations {
        InvitationService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
        .with_config(self.config.clone())
    }

    pub fn tasks(&self) -> Tasks {
        TaskService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
        .with_config(self.config.clone())
    }

    pub fn comments(&self) -> Comments {
        CommentService::new(
            Arc::clone(&self.comments),
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.clock),
        )
        .with_config(self.config.clone())
    }

    /// Returns the date `days` after today.
    pub fn due_in(&self, days: u64) -> eyre::Result<NaiveDate> {
        self.clock
            .utc()
            .date_naive()
            .checked_add_days(Days::new(days))
            .ok_or_else(|| eyre::eyre!("due date out of range"))
    }

    /// Registers a manager and returns their principal.
    pub async fn manager(&self, email: &str) -> eyre::Result<Principal> {
        let user = self
            .identity()
            .register_manager(RegisterManagerRequest::new(email, "Marta", "Ruiz", "hash"))
            .await?;
        Ok(Principal::from_user(&user))
    }

    /// Creates a project owned by `owner`.
    pub async fn project(&self, owner: &Principal, title: &str) -> eyre::Result<Project> {
        Ok(self
            .projects()
            .create(owner, ProjectRequest::new(title))
            .await?)
    }

    /// Invites `email` into `project` and returns the collaborator principal.
    pub async fn invite(
        &self,
        owner: &Principal,
        project: &Project,
        email: &str,
    ) -> eyre::Result<Principal> {
        let invitation = self
            .invitations()
            .invite(
                owner,
                project.id(),
                email,
                Some(NewCollaboratorDetails::new("Ana", "Li")),
            )
            .await?;
        Ok(Principal::from_user(invitation.collaborator()))
    }

    /// Creates a task due in a week.
    pub async fn task(
        &self,
        owner: &Principal,
        project: &Project,
        assignee: &Principal,
        title: &str,
    ) -> eyre::Result<Task> {
        let request = TaskRequest::new(title, self.due_in(7)?, assignee.email().as_str());
        Ok(self.tasks().create(owner, project.id(), request).await?)
    }
}

/// Provides fresh stores with the default configuration.
#[fixture]
pub fn stores() -> Stores {
    Stores::with_config(EngineConfig::default())
}
