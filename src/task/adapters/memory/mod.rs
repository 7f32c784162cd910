//! In-memory adapters for the task store.

mod task;

pub use task::InMemoryTaskRepository;
