//! Task store.
//!
//! Tasks live under a project, are assigned to one of its collaborators and
//! move between pending, in-progress and completed. Owners create, edit,
//! delete and re-status tasks; assignees may only complete them. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
