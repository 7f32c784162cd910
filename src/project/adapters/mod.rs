//! Adapter implementations for the project store.

pub mod memory;
