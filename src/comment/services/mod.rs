//! Application services for the comment log.

mod discussion;

pub use discussion::{CommentService, CommentServiceError, CommentServiceResult};
