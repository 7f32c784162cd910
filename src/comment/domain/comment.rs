//! Comment entity.

use super::{CommentDomainError, CommentId};
use crate::config::ValidationLimits;
use crate::identity::domain::Email;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentContent(String);

impl CommentContent {
    /// Validates comment text.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] for blank text and
    /// [`CommentDomainError::ContentTooLong`] when the trimmed text exceeds
    /// the configured limit.
    pub fn new(
        content: impl Into<String>,
        limits: &ValidationLimits,
    ) -> Result<Self, CommentDomainError> {
        let trimmed = content.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(CommentDomainError::EmptyContent);
        }
        if trimmed.chars().count() > limits.max_comment_length {
            return Err(CommentDomainError::ContentTooLong {
                max: limits.max_comment_length,
            });
        }
        Ok(Self(trimmed))
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An append-only remark on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: Email,
    content: CommentContent,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Author's email.
    pub author: Email,
    /// Comment text.
    pub content: CommentContent,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment stamped with the current time.
    #[must_use]
    pub fn new(
        id: CommentId,
        task_id: TaskId,
        author: Email,
        content: CommentContent,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            task_id,
            author,
            content,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author: data.author,
            content: data.content,
            created_at: data.created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the parent task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author's email.
    #[must_use]
    pub const fn author(&self) -> &Email {
        &self.author
    }

    /// Returns the text.
    #[must_use]
    pub const fn content(&self) -> &CommentContent {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
