//! Data Transfer Objects sent to the scheduler service
//!
//! These are write-only command payloads; responses use the domain types.

pub mod scheduler;
