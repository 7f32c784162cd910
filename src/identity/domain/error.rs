//! Error types for identity domain validation and parsing.

use super::Email;
use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email is empty after trimming.
    #[error("email must not be empty")]
    EmptyEmail,

    /// The email lacks an `@` or a `.`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The email exceeds the storage limit.
    #[error("email exceeds {max} character limit: {value}")]
    EmailTooLong {
        /// Offending value.
        value: String,
        /// Maximum accepted length.
        max: usize,
    },

    /// The given name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The surname is empty after trimming.
    #[error("surname must not be empty")]
    EmptySurname,

    /// A profile field exceeds its configured limit.
    #[error("{field} exceeds {max} character limit")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },

    /// The supplied password hash is empty.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,

    /// The account already completed its first password set.
    #[error("account {0} already has a password")]
    PasswordAlreadySet(Email),
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
