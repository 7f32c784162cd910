//! Domain model for user accounts.
//!
//! Accounts are keyed by email, carry an immutable role, and may be created
//! without a credential when a manager invites a collaborator.

mod credential;
mod email;
mod error;
mod ids;
mod profile;
mod role;
mod user;

pub use credential::PasswordHash;
pub use email::Email;
pub use error::{IdentityDomainError, ParseRoleError};
pub use ids::UserId;
pub use profile::UserProfile;
pub use role::Role;
pub use user::User;
