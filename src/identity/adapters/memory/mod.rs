//! In-memory adapters for tests and embedded use.

mod directory;

pub use directory::InMemoryUserDirectory;
