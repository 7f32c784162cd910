//! Caller identity as supplied by the authentication collaborator.

use crate::identity::domain::{Email, IdentityDomainError, Role, User};
use std::fmt;

/// The authenticated caller of an operation.
///
/// The engine never authenticates credentials; it trusts the email and role
/// the caller presents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    email: Email,
    role: Role,
}

impl Principal {
    /// Creates a principal from a validated email and role.
    #[must_use]
    pub const fn new(email: Email, role: Role) -> Self {
        Self { email, role }
    }

    /// Creates a manager principal from a raw email.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the email is not plausible.
    pub fn manager(email: &str) -> Result<Self, IdentityDomainError> {
        Ok(Self::new(Email::new(email)?, Role::Manager))
    }

    /// Creates a collaborator principal from a raw email.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError`] when the email is not plausible.
    pub fn collaborator(email: &str) -> Result<Self, IdentityDomainError> {
        Ok(Self::new(Email::new(email)?, Role::Collaborator))
    }

    /// Creates the principal acting as a stored account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self::new(user.email().clone(), user.role())
    }

    /// Returns the principal's email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the principal's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.email, self.role)
    }
}
