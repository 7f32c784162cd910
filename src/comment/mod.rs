//! Comment log: append-only remarks on tasks.
//!
//! Members of a task's project may comment while the project is open and
//! read the log at any time. Comments are never edited or removed.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
