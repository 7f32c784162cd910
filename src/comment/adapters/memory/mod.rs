//! In-memory adapters for the comment log.

mod comment;

pub use comment::InMemoryCommentRepository;
