//! Error types for comment validation.

use thiserror::Error;

/// Errors returned while constructing comment values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The content is empty after trimming.
    #[error("comment must not be empty")]
    EmptyContent,

    /// The content exceeds the configured limit.
    #[error("comment must be at most {max} characters")]
    ContentTooLong {
        /// Configured maximum.
        max: usize,
    },
}
