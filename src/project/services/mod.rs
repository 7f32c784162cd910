//! Application services for projects and their membership.

pub mod invitation;
mod store;

pub use invitation::{
    Invitation, InvitationError, InvitationOutcome, InvitationResult, InvitationService,
    NewCollaboratorDetails,
};
pub(crate) use store::repository_error_kind;
pub use store::{ProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult};
