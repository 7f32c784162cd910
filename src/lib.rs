//! Taskboard: authorization and lifecycle engine for collaborative projects.
//!
//! Managers own projects, invite collaborators and assign them tasks;
//! collaborators complete their tasks and discuss them in comments. Every
//! operation takes the caller's [`access::Principal`] explicitly and is
//! decided by the [`access`] engine before any store is touched.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (in-memory stores)
//! - **Services**: Orchestration of authorization, validation and persistence
//!
//! # Modules
//!
//! - [`identity`]: User accounts keyed by email
//! - [`access`]: Capability decisions over projects and tasks
//! - [`project`]: Projects, their membership and the invitation workflow
//! - [`task`]: Tasks and their status state machine
//! - [`comment`]: Append-only task comments
//! - [`config`]: Validation limits and closed-project policy
//! - [`error`]: Shared failure taxonomy

pub mod access;
pub mod comment;
pub mod config;
pub mod error;
pub mod identity;
pub mod project;
pub mod task;

#[cfg(test)]
mod test_support;
