//! Task aggregate root and its editable details.

use super::{Assignee, TaskDomainError, TaskId, TaskStatus};
use crate::access::{ProjectAccess, TaskAccess};
use crate::config::ValidationLimits;
use crate::identity::domain::Email;
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated title, description and due date of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: String,
    description: String,
    due_date: NaiveDate,
}

impl TaskDetails {
    /// Validates task details against the configured limits.
    ///
    /// The due date is checked against the clock when the details are
    /// applied to a task, not here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`],
    /// [`TaskDomainError::TitleTooLong`] or
    /// [`TaskDomainError::DescriptionTooLong`].
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        limits: &ValidationLimits,
    ) -> Result<Self, TaskDomainError> {
        let trimmed_title = title.into().trim().to_owned();
        if trimmed_title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if trimmed_title.chars().count() > limits.max_task_title_length {
            return Err(TaskDomainError::TitleTooLong {
                max: limits.max_task_title_length,
            });
        }

        let trimmed_description = description.into().trim().to_owned();
        if trimmed_description.chars().count() > limits.max_task_description_length {
            return Err(TaskDomainError::DescriptionTooLong {
                max: limits.max_task_description_length,
            });
        }

        Ok(Self {
            title: trimmed_title,
            description: trimmed_description,
            due_date,
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

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    details: TaskDetails,
    status: TaskStatus,
    assignee: Email,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when the due date is before
    /// the clock's current date.
    pub fn new(
        id: TaskId,
        project_id: ProjectId,
        details: TaskDetails,
        assignee: Assignee,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        ensure_due_date_not_past(details.due_date(), clock)?;
        let timestamp = clock.utc();
        Ok(Self {
            id,
            project_id,
            details,
            status: TaskStatus::Pending,
            assignee: assignee.into_email(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the editable details.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee's email.
    #[must_use]
    pub const fn assignee(&self) -> &Email {
        &self.assignee
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

    /// Builds the access view of this task under its parent project.
    #[must_use]
    pub const fn access<'a>(&'a self, project: ProjectAccess<'a>) -> TaskAccess<'a> {
        TaskAccess::new(project, &self.assignee)
    }

    /// Replaces details and assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when the new due date is
    /// before the clock's current date. The task is unchanged on error.
    pub fn edit(
        &mut self,
        details: TaskDetails,
        assignee: Assignee,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        ensure_due_date_not_past(details.due_date(), clock)?;
        self.details = details;
        self.assignee = assignee.into_email();
        self.touch(clock);
        Ok(())
    }

    /// Sets the status. Authorization decides which moves are allowed.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn ensure_due_date_not_past(due_date: NaiveDate, clock: &impl Clock) -> Result<(), TaskDomainError> {
    let today = clock.utc().date_naive();
    if due_date < today {
        return Err(TaskDomainError::DueDateInPast { due_date, today });
    }
    Ok(())
}
