//! Port contracts for the comment log.

pub mod repository;

pub use repository::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
