//! In-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Email, Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    last_id: u64,
    users: HashMap<UserId, User>,
    email_index: HashMap<Email, UserId>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> UserDirectoryError {
    UserDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_id(mut users: Vec<User>) -> Vec<User> {
    users.sort_by_key(User::id);
    users
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn next_id(&self) -> UserDirectoryResult<UserId> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.last_id = state.last_id.saturating_add(1);
        Ok(UserId::new(state.last_id))
    }

    async fn create(&self, user: &User) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.email_index.contains_key(user.email()) {
            return Err(UserDirectoryError::DuplicateEmail(user.email().clone()));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let indexed_id = state
            .email_index
            .get(user.email())
            .copied()
            .ok_or_else(|| UserDirectoryError::NotFound(user.email().clone()))?;
        if indexed_id != user.id() {
            return Err(UserDirectoryError::DuplicateEmail(user.email().clone()));
        }

        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn remove(&self, email: &Email) -> UserDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let id = state
            .email_index
            .remove(email)
            .ok_or_else(|| UserDirectoryError::NotFound(email.clone()))?;
        state.users.remove(&id);
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> UserDirectoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn exists(&self, email: &Email) -> UserDirectoryResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.email_index.contains_key(email))
    }

    async fn list_by_role(&self, role: Role) -> UserDirectoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let users = state
            .users
            .values()
            .filter(|user| user.role() == role)
            .cloned()
            .collect();
        Ok(sorted_by_id(users))
    }

    async fn count_by_role(&self, role: Role) -> UserDirectoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let count = state
            .users
            .values()
            .filter(|user| user.role() == role)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}
