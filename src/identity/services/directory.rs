//! Service layer for account creation, lookup and first-password set.

use crate::{
    config::EngineConfig,
    error::ErrorKind,
    identity::{
        domain::{Email, IdentityDomainError, PasswordHash, Role, User, UserProfile},
        ports::{UserDirectory, UserDirectoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Request payload for a manager's self-registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterManagerRequest {
    email: String,
    name: String,
    surname: String,
    password_hash: String,
    phone: Option<String>,
    photo_reference: Option<String>,
}

impl RegisterManagerRequest {
    /// Creates a request with the mandatory registration fields.
    ///
    /// `password_hash` is the already-encoded credential; hashing belongs to
    /// the authentication collaborator.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            surname: surname.into(),
            password_hash: password_hash.into(),
            phone: None,
            photo_reference: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the photo reference.
    #[must_use]
    pub fn with_photo_reference(mut self, photo_reference: impl Into<String>) -> Self {
        self.photo_reference = Some(photo_reference.into());
        self
    }
}

/// Request payload for creating an account without a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountRequest {
    email: String,
    name: String,
    surname: String,
    phone: Option<String>,
    role: Role,
}

impl NewAccountRequest {
    /// Creates a request with the mandatory account fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            surname: surname.into(),
            phone: None,
            role,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }
}

/// Editable personal details of an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: String,
    surname: String,
    phone: Option<String>,
    photo_reference: Option<String>,
}

impl ProfileUpdate {
    /// Creates an update with the mandatory fields. Optional fields left
    /// unset are cleared.
    #[must_use]
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            phone: None,
            photo_reference: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the photo reference.
    #[must_use]
    pub fn with_photo_reference(mut self, photo_reference: impl Into<String>) -> Self {
        self.photo_reference = Some(photo_reference.into());
        self
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

impl IdentityServiceError {
    /// Classifies the failure for presentation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Directory(err) => directory_error_kind(err),
        }
    }
}

/// Classifies a directory failure; shared by services that resolve accounts.
pub(crate) const fn directory_error_kind(err: &UserDirectoryError) -> ErrorKind {
    match err {
        UserDirectoryError::DuplicateEmail(_) => ErrorKind::AlreadyExists,
        UserDirectoryError::NotFound(_) => ErrorKind::NotFound,
        UserDirectoryError::Persistence(_) => ErrorKind::Persistence,
    }
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// Account orchestration service.
#[derive(Clone)]
pub struct IdentityService<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
    config: EngineConfig,
}

impl<D, C> IdentityService<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new identity service with the default configuration.
    #[must_use]
    pub fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            directory,
            clock,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a manager account with its credential.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] when a field fails
    /// validation, or [`IdentityServiceError::Directory`] wrapping
    /// [`UserDirectoryError::DuplicateEmail`] when the email is taken.
    #[instrument(
        name = "taskboard.identity.register_manager",
        skip(self, request),
        fields(email = %request.email)
    )]
    pub async fn register_manager(
        &self,
        request: RegisterManagerRequest,
    ) -> IdentityServiceResult<User> {
        let RegisterManagerRequest {
            email: raw_email,
            name,
            surname,
            password_hash: encoded_hash,
            phone,
            photo_reference,
        } = request;

        let limits = &self.config.limits;
        let email = Email::new(raw_email)?;
        let profile = UserProfile::new(name, surname, limits)?
            .with_phone(phone, limits)?
            .with_photo_reference(photo_reference, limits)?;
        let password_hash = PasswordHash::new(encoded_hash)?;
        self.ensure_available(&email).await?;

        let id = self.directory.next_id().await?;
        let mut user = User::new(id, email, profile, Role::Manager, &*self.clock);
        user.set_initial_password(password_hash, &*self.clock)?;
        self.directory.create(&user).await?;

        info!(user_id = %user.id(), "registered manager account");
        Ok(user)
    }

    /// Creates an account with no credential.
    ///
    /// The account is pending until
    /// [`set_initial_password`](Self::set_initial_password) succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] when a field fails
    /// validation, or [`IdentityServiceError::Directory`] wrapping
    /// [`UserDirectoryError::DuplicateEmail`] when the email is taken.
    #[instrument(
        name = "taskboard.identity.create_account",
        skip(self, request),
        fields(email = %request.email, role = %request.role)
    )]
    pub async fn create_account(&self, request: NewAccountRequest) -> IdentityServiceResult<User> {
        let NewAccountRequest {
            email: raw_email,
            name,
            surname,
            phone,
            role,
        } = request;

        let limits = &self.config.limits;
        let email = Email::new(raw_email)?;
        let profile = UserProfile::new(name, surname, limits)?.with_phone(phone, limits)?;
        self.ensure_available(&email).await?;

        let id = self.directory.next_id().await?;
        let user = User::new(id, email, profile, role, &*self.clock);
        self.directory.create(&user).await?;

        info!(user_id = %user.id(), "created account pending first password");
        Ok(user)
    }

    /// Finds an account by email.
    ///
    /// Returns `Ok(None)` when no account uses the email.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] when the email string fails
    /// validation, or [`IdentityServiceError::Directory`] when lookup fails.
    #[instrument(name = "taskboard.identity.find_by_email", skip(self))]
    pub async fn find_by_email(&self, email: &str) -> IdentityServiceResult<Option<User>> {
        let key = Email::new(email)?;
        let user = self.directory.find_by_email(&key).await?;
        debug!(found = user.is_some(), "looked up account");
        Ok(user)
    }

    /// Returns `true` when an account uses the email.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] when the email string fails
    /// validation, or [`IdentityServiceError::Directory`] when lookup fails.
    pub async fn exists(&self, email: &str) -> IdentityServiceResult<bool> {
        let key = Email::new(email)?;
        Ok(self.directory.exists(&key).await?)
    }

    /// Persists an account as given and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Directory`] when the account does not
    /// exist or persistence fails.
    pub async fn save(&self, user: User) -> IdentityServiceResult<User> {
        self.directory.save(&user).await?;
        Ok(user)
    }

    /// Returns every collaborator account, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Directory`] when lookup fails.
    pub async fn list_collaborators(&self) -> IdentityServiceResult<Vec<User>> {
        Ok(self.directory.list_by_role(Role::Collaborator).await?)
    }

    /// Counts the accounts holding a role.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Directory`] when lookup fails.
    pub async fn count_by_role(&self, role: Role) -> IdentityServiceResult<u64> {
        Ok(self.directory.count_by_role(role).await?)
    }

    /// Completes the first password set of a pending account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] wrapping
    /// [`IdentityDomainError::PasswordAlreadySet`] when the account already
    /// has a credential, or [`IdentityServiceError::Directory`] when the
    /// account does not exist.
    #[instrument(
        name = "taskboard.identity.set_initial_password",
        skip(self, password_hash)
    )]
    pub async fn set_initial_password(
        &self,
        email: &str,
        password_hash: PasswordHash,
    ) -> IdentityServiceResult<User> {
        let mut user = self.find_by_email_or_error(email).await?;
        user.set_initial_password(password_hash, &*self.clock)?;
        self.directory.save(&user).await?;

        info!(user_id = %user.id(), "completed first password set");
        Ok(user)
    }

    /// Replaces the personal details of an account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] when a field fails
    /// validation, or [`IdentityServiceError::Directory`] when the account
    /// does not exist.
    #[instrument(name = "taskboard.identity.update_profile", skip(self, update))]
    pub async fn update_profile(
        &self,
        email: &str,
        update: ProfileUpdate,
    ) -> IdentityServiceResult<User> {
        let ProfileUpdate {
            name,
            surname,
            phone,
            photo_reference,
        } = update;

        let limits = &self.config.limits;
        let profile = UserProfile::new(name, surname, limits)?
            .with_phone(phone, limits)?
            .with_photo_reference(photo_reference, limits)?;

        let mut user = self.find_by_email_or_error(email).await?;
        user.update_profile(profile, &*self.clock);
        self.directory.save(&user).await?;

        info!(user_id = %user.id(), "updated profile");
        Ok(user)
    }

    async fn ensure_available(&self, email: &Email) -> IdentityServiceResult<()> {
        if self.directory.exists(email).await? {
            return Err(UserDirectoryError::DuplicateEmail(email.clone()).into());
        }
        Ok(())
    }

    async fn find_by_email_or_error(&self, email: &str) -> IdentityServiceResult<User> {
        let key = Email::new(email)?;
        self.directory
            .find_by_email(&key)
            .await?
            .ok_or_else(|| UserDirectoryError::NotFound(key).into())
    }
}
