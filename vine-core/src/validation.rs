//! Client-side validation
//!
//! Every check here runs before a request is built, so a rejected input never
//! reaches the network. Field names match the wire names so presentation code
//! can attach the message to the offending input.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::domain::history::{HistoryFilter, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::dto::scheduler::SchedulerConfig;

/// Longest accepted scheduling interval (24 hours)
pub const MAX_INTERVAL_MINUTES: u32 = 1440;

/// Largest `limit` accepted by the latest-executions endpoint
pub const MAX_LATEST_LIMIT: u32 = 50;

static START_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("start time pattern is valid")
});

/// Rejected client input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Wire name of the offending field
    pub field: &'static str,
    /// Human-readable explanation
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks page bounds and the optional days window
pub fn validate_history_filter(filter: &HistoryFilter) -> Result<(), ValidationError> {
    if filter.page < 0 {
        return Err(ValidationError::new("page", "Page must not be negative"));
    }

    if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&filter.page_size) {
        return Err(ValidationError::new(
            "size",
            format!(
                "Page size must be between {} and {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE
            ),
        ));
    }

    if matches!(filter.days_window, Some(days) if days <= 0) {
        return Err(ValidationError::new(
            "days",
            "Days window must be a positive number of days",
        ));
    }

    Ok(())
}

/// Interval passed to `start`
pub fn validate_start_interval(interval_minutes: u32) -> Result<(), ValidationError> {
    if interval_minutes < 1 {
        return Err(ValidationError::new(
            "intervalMinutes",
            "Interval must be at least 1 minute",
        ));
    }
    Ok(())
}

/// Interval and start time of a configuration update
pub fn validate_scheduler_config(config: &SchedulerConfig) -> Result<(), ValidationError> {
    if config.interval_minutes < 1 {
        return Err(ValidationError::new(
            "intervalMinutes",
            "Interval must be at least 1 minute",
        ));
    }

    if config.interval_minutes > MAX_INTERVAL_MINUTES {
        return Err(ValidationError::new(
            "intervalMinutes",
            format!(
                "Interval cannot exceed {} minutes (24 hours)",
                MAX_INTERVAL_MINUTES
            ),
        ));
    }

    if let Some(start) = &config.start_from_time {
        validate_start_time(start)?;
    }

    Ok(())
}

/// `HH:MM` with an optional leading zero on the hour
pub fn validate_start_time(value: &str) -> Result<(), ValidationError> {
    if START_TIME_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "startFromTime",
            "Start time must be in HH:MM format",
        ))
    }
}

/// Number of executions requested from the latest-executions endpoint
pub fn validate_latest_limit(limit: u32) -> Result<(), ValidationError> {
    if !(1..=MAX_LATEST_LIMIT).contains(&limit) {
        return Err(ValidationError::new(
            "limit",
            format!("Limit must be between 1 and {}", MAX_LATEST_LIMIT),
        ));
    }
    Ok(())
}
