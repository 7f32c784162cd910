//! User account aggregate root.

use super::{Email, IdentityDomainError, PasswordHash, Role, UserId, UserProfile};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// User account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    profile: UserProfile,
    role: Role,
    password_hash: Option<PasswordHash>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates an account without a credential.
    ///
    /// The account stays pending until
    /// [`set_initial_password`](Self::set_initial_password) is called.
    #[must_use]
    pub fn new(
        id: UserId,
        email: Email,
        profile: UserProfile,
        role: Role,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            email,
            profile,
            role,
            password_hash: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email key.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the personal details.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the stored credential, if any.
    #[must_use]
    pub const fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    /// Returns `true` while the account still needs its first password.
    #[must_use]
    pub const fn is_pending_password(&self) -> bool {
        self.password_hash.is_none()
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

    /// Completes the first password set for a pending account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::PasswordAlreadySet`] when the account
    /// already has a credential.
    pub fn set_initial_password(
        &mut self,
        password_hash: PasswordHash,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        if self.password_hash.is_some() {
            return Err(IdentityDomainError::PasswordAlreadySet(self.email.clone()));
        }
        self.password_hash = Some(password_hash);
        self.touch(clock);
        Ok(())
    }

    /// Replaces the personal details. Email and role are not editable.
    pub fn update_profile(&mut self, profile: UserProfile, clock: &impl Clock) {
        self.profile = profile;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
