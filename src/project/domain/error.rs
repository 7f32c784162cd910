//! Error types for project domain validation.

use crate::identity::domain::Email;
use thiserror::Error;

/// Errors returned while constructing or changing projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The title length falls outside the configured bounds.
    #[error("project title must be between {min} and {max} characters")]
    TitleLength {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The description exceeds the configured limit.
    #[error("project description must be at most {max} characters")]
    DescriptionTooLong {
        /// Configured maximum.
        max: usize,
    },

    /// The proposed owner does not hold the manager role.
    #[error("project owner {0} must be a manager")]
    OwnerNotManager(Email),

    /// A manager account cannot join a project as a collaborator.
    #[error("{0} is a manager and cannot be added as a collaborator")]
    CollaboratorIsManager(Email),
}
