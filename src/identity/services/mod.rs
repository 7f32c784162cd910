//! Application services for account management.

mod directory;

pub(crate) use directory::directory_error_kind;
pub use directory::{
    IdentityService, IdentityServiceError, IdentityServiceResult, NewAccountRequest,
    ProfileUpdate, RegisterManagerRequest,
};
