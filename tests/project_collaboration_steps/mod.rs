//! Step definitions for project collaboration scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
