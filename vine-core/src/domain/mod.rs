//! Core domain types
//!
//! These types mirror what the remote scheduler service owns. The console never
//! mutates them in place: every snapshot is replaced wholesale when a newer one
//! arrives.

pub mod execution;
pub mod history;
pub mod scheduler;
