//! Validated email address used as the account key.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an email address, matching the `VARCHAR(255)` column.
const MAX_EMAIL_LENGTH: usize = 255;

/// Account email address.
///
/// Validation is deliberately permissive: the trimmed value must contain an
/// `@` and a `.`. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyEmail`] when the value is blank,
    /// [`IdentityDomainError::EmailTooLong`] when it exceeds 255 characters,
    /// or [`IdentityDomainError::InvalidEmail`] when it lacks `@` or `.`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyEmail);
        }

        if normalized.chars().count() > MAX_EMAIL_LENGTH {
            return Err(IdentityDomainError::EmailTooLong {
                value: raw,
                max: MAX_EMAIL_LENGTH,
            });
        }

        if !normalized.contains('@') || !normalized.contains('.') {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the email as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
