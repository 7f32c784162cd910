//! Fixtures shared by the unit test modules.

use std::sync::Arc;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::access::Principal;
use crate::comment::{adapters::memory::InMemoryCommentRepository, services::CommentService};
use crate::identity::{
    adapters::memory::InMemoryUserDirectory,
    services::{IdentityService, RegisterManagerRequest},
};
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::Project,
    services::{InvitationService, NewCollaboratorDetails, ProjectRequest, ProjectService},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskRequest, TaskService},
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to noon UTC on the given date.
    pub(crate) fn on(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid fixed instant");
        Self(instant)
    }

    /// Returns the pinned calendar date.
    pub(crate) fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Returns the date `days` after the pinned date.
    pub(crate) fn days_ahead(&self, days: u64) -> NaiveDate {
        self.today()
            .checked_add_days(Days::new(days))
            .expect("date in range")
    }

    /// Returns the date `days` before the pinned date.
    pub(crate) fn days_ago(&self, days: u64) -> NaiveDate {
        self.today()
            .checked_sub_days(Days::new(days))
            .expect("date in range")
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) type TestProjectService =
    ProjectService<InMemoryProjectRepository, InMemoryUserDirectory, FixedClock>;
pub(crate) type TestInvitationService =
    InvitationService<InMemoryProjectRepository, InMemoryUserDirectory, FixedClock>;
pub(crate) type TestTaskService = TaskService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryUserDirectory,
    FixedClock,
>;
pub(crate) type TestCommentService = CommentService<
    InMemoryCommentRepository,
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    FixedClock,
>;

/// In-memory stores wired to one pinned clock.
#[derive(Debug, Clone)]
pub(crate) struct Harness {
    pub(crate) directory: Arc<InMemoryUserDirectory>,
    pub(crate) projects: Arc<InMemoryProjectRepository>,
    pub(crate) tasks: Arc<InMemoryTaskRepository>,
    pub(crate) comments: Arc<InMemoryCommentRepository>,
    pub(crate) clock: Arc<FixedClock>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self {
            directory: Arc::new(InMemoryUserDirectory::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            clock: Arc::new(FixedClock::on(2026, 3, 14)),
        }
    }

    pub(crate) fn identity(&self) -> IdentityService<InMemoryUserDirectory, FixedClock> {
        IdentityService::new(Arc::clone(&self.directory), Arc::clone(&self.clock))
    }

    pub(crate) fn project_service(&self) -> TestProjectService {
        ProjectService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn invitation_service(&self) -> TestInvitationService {
        InvitationService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn task_service(&self) -> TestTaskService {
        TaskService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
    }

    pub(crate) fn comment_service(&self) -> TestCommentService {
        CommentService::new(
            Arc::clone(&self.comments),
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.clock),
        )
    }

    /// Registers a manager account and returns its principal.
    pub(crate) async fn manager(&self, email: &str) -> Principal {
        let user = self
            .identity()
            .register_manager(RegisterManagerRequest::new(email, "Marta", "Ruiz", "hash"))
            .await
            .expect("manager registration should succeed");
        Principal::from_user(&user)
    }

    /// Creates a project owned by `owner`.
    pub(crate) async fn project(&self, owner: &Principal, title: &str) -> Project {
        self.project_service()
            .create(owner, ProjectRequest::new(title).with_description("Test project"))
            .await
            .expect("project creation should succeed")
    }

    /// Invites `email` into the project, provisioning an account if needed,
    /// and returns the collaborator's principal.
    pub(crate) async fn collaborator(
        &self,
        owner: &Principal,
        project: &Project,
        email: &str,
    ) -> Principal {
        let invitation = self
            .invitation_service()
            .invite(
                owner,
                project.id(),
                email,
                Some(NewCollaboratorDetails::new("Ana", "Li")),
            )
            .await
            .expect("invitation should succeed");
        Principal::from_user(invitation.collaborator())
    }

    /// Creates a task due tomorrow assigned to `assignee`.
    pub(crate) async fn task(
        &self,
        owner: &Principal,
        project: &Project,
        assignee: &Principal,
        title: &str,
    ) -> Task {
        self.task_service()
            .create(
                owner,
                project.id(),
                TaskRequest::new(title, self.clock.days_ahead(1), assignee.email().as_str()),
            )
            .await
            .expect("task creation should succeed")
    }
}
