//! Project store and invitation workflow.
//!
//! A project is owned by one manager and shared with a set of
//! collaborators. Owners invite collaborators (provisioning accounts when
//! needed), edit details and eventually close the project, after which only
//! reads and owner status changes remain possible. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
