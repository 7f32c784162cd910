//! Failure taxonomy shared by every service in the crate.
//!
//! Each bounded context keeps its own `thiserror` enums; they all classify
//! themselves into an [`ErrorKind`] so callers can pick a presentation
//! (not-found page, permission message, field-level feedback) without
//! matching on context-specific variants.

use std::fmt;

/// Caller-facing classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The resource does not exist or the caller has no read access to it.
    NotFound,
    /// The resource exists but the requested capability is denied.
    Unauthorized,
    /// The parent project is closed and blocks the action.
    ProjectClosed,
    /// Caller input violates a structural invariant.
    Validation,
    /// An account with the same email already exists.
    AlreadyExists,
    /// The backing store failed.
    Persistence,
}

impl ErrorKind {
    /// Returns a stable, lowercase identifier for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::ProjectClosed => "project_closed",
            Self::Validation => "validation",
            Self::AlreadyExists => "already_exists",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
