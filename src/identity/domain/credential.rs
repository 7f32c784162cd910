//! Opaque password credential.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Password hash produced by the external authentication collaborator.
///
/// The directory stores and compares nothing about the hash; it only
/// records whether an account has completed its first password set.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an encoded password hash.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyPasswordHash`] when the value is
    /// blank.
    pub fn new(encoded: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let value = encoded.into();
        if value.trim().is_empty() {
            return Err(IdentityDomainError::EmptyPasswordHash);
        }
        Ok(Self(value))
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
