//! Directory port for account persistence and lookup.

use crate::identity::domain::{Email, Role, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Account persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Reserves the identifier for the next account.
    async fn next_id(&self) -> UserDirectoryResult<UserId>;

    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateEmail`] when an account with
    /// the same email already exists.
    async fn create(&self, user: &User) -> UserDirectoryResult<()>;

    /// Persists changes to an existing account (profile, credential).
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when the account does not
    /// exist.
    async fn save(&self, user: &User) -> UserDirectoryResult<()>;

    /// Deletes an account created earlier in a failed workflow.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] when no account uses the
    /// email.
    async fn remove(&self, email: &Email) -> UserDirectoryResult<()>;

    /// Finds an account by email.
    ///
    /// Returns `None` when no account uses the email.
    async fn find_by_email(&self, email: &Email) -> UserDirectoryResult<Option<User>>;

    /// Returns `true` when an account uses the email.
    async fn exists(&self, email: &Email) -> UserDirectoryResult<bool>;

    /// Returns every account with the given role, ordered by identifier.
    async fn list_by_role(&self, role: Role) -> UserDirectoryResult<Vec<User>>;

    /// Counts the accounts with the given role.
    async fn count_by_role(&self, role: Role) -> UserDirectoryResult<u64>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// An account with the same email already exists.
    #[error("account already exists: {0}")]
    DuplicateEmail(Email),

    /// The account was not found.
    #[error("account not found: {0}")]
    NotFound(Email),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
