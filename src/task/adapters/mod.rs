//! Adapter implementations for the task store.

pub mod memory;
