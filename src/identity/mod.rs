//! Identity directory: user accounts keyed by email.
//!
//! Accounts are either managers, who register themselves with a credential,
//! or collaborators, who are provisioned by an invitation and stay pending
//! until they set a first password. The module follows hexagonal
//! architecture:
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
