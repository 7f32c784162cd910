//! Access control engine.
//!
//! A stateless decision function over a [`Principal`] and a borrowed view of
//! the target resource. Services load the resource, build a
//! [`ProjectAccess`] or [`TaskAccess`] view, and ask [`AccessControl`] before
//! every mutation and scoped read. No other module compares owner or
//! membership emails on its own.

mod decision;
mod principal;
mod resource;

pub use decision::{AccessControl, AccessDenied, AccessResult, DenialReason, can_access};
pub use principal::Principal;
pub use resource::{ProjectAccess, ProjectCapability, TaskAccess, TaskCapability};
