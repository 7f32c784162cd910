//! Port contracts for the identity directory.

pub mod repository;

pub use repository::{UserDirectory, UserDirectoryError, UserDirectoryResult};
