//! In-memory adapters for the project store.

mod project;

pub use project::InMemoryProjectRepository;
