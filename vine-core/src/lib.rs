//! VINE Core
//!
//! Core types for the VINE scheduler console.
//!
//! This crate contains:
//! - Domain types: scheduler status, job executions and history pages as the
//!   scheduler service reports them
//! - DTOs: command payloads sent to the scheduler service
//! - Validation: client-side checks performed before any request is issued
//! - View: pure derivations used by presentation code (durations, severities)

pub mod domain;
pub mod dto;
pub mod timestamp;
pub mod validation;
pub mod view;
