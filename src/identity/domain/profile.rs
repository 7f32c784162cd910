//! Personal details attached to an account.

use super::IdentityDomainError;
use crate::config::ValidationLimits;
use serde::{Deserialize, Serialize};

/// Display name, surname and optional contact details of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    name: String,
    surname: String,
    phone: Option<String>,
    photo_reference: Option<String>,
}

impl UserProfile {
    /// Creates a profile with the mandatory fields.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] or
    /// [`IdentityDomainError::EmptySurname`] for blank values, and
    /// [`IdentityDomainError::FieldTooLong`] when a value exceeds its limit.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        limits: &ValidationLimits,
    ) -> Result<Self, IdentityDomainError> {
        let trimmed_name = name.into().trim().to_owned();
        if trimmed_name.is_empty() {
            return Err(IdentityDomainError::EmptyName);
        }
        ensure_within("name", &trimmed_name, limits.max_name_length)?;

        let trimmed_surname = surname.into().trim().to_owned();
        if trimmed_surname.is_empty() {
            return Err(IdentityDomainError::EmptySurname);
        }
        ensure_within("surname", &trimmed_surname, limits.max_surname_length)?;

        Ok(Self {
            name: trimmed_name,
            surname: trimmed_surname,
            phone: None,
            photo_reference: None,
        })
    }

    /// Sets the phone number. A blank value clears it.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::FieldTooLong`] when the value exceeds
    /// the configured limit.
    pub fn with_phone(
        mut self,
        phone: Option<String>,
        limits: &ValidationLimits,
    ) -> Result<Self, IdentityDomainError> {
        self.phone = optional_field("phone", phone, limits.max_phone_length)?;
        Ok(self)
    }

    /// Sets the photo reference. A blank value clears it.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::FieldTooLong`] when the value exceeds
    /// the configured limit.
    pub fn with_photo_reference(
        mut self,
        photo_reference: Option<String>,
        limits: &ValidationLimits,
    ) -> Result<Self, IdentityDomainError> {
        self.photo_reference = optional_field(
            "photo reference",
            photo_reference,
            limits.max_photo_reference_length,
        )?;
        Ok(self)
    }

    /// Returns the given name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the surname.
    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Returns the phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the photo reference, if any.
    #[must_use]
    pub fn photo_reference(&self) -> Option<&str> {
        self.photo_reference.as_deref()
    }
}

fn ensure_within(field: &'static str, value: &str, max: usize) -> Result<(), IdentityDomainError> {
    if value.chars().count() > max {
        return Err(IdentityDomainError::FieldTooLong { field, max });
    }
    Ok(())
}

fn optional_field(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, IdentityDomainError> {
    let Some(trimmed) = value.map(|raw| raw.trim().to_owned()) else {
        return Ok(None);
    };
    if trimmed.is_empty() {
        return Ok(None);
    }
    ensure_within(field, &trimmed, max)?;
    Ok(Some(trimmed))
}
