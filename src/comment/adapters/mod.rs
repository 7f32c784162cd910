//! Adapter implementations for the comment log.

pub mod memory;
