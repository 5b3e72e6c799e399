//! Scheduler command DTOs

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Default interval applied by the service when `start` carries none
pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

/// Configuration update for future runs
///
/// Does not affect an execution already in progress. `start_from_time` is
/// serialized as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub interval_minutes: u32,
    pub start_from_time: Option<String>,
}

impl SchedulerConfig {
    pub fn new(enabled: bool, interval_minutes: u32) -> Self {
        Self {
            enabled,
            interval_minutes,
            start_from_time: None,
        }
    }

    pub fn with_start_from(mut self, start_from_time: impl Into<String>) -> Self {
        self.start_from_time = Some(start_from_time.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_scheduler_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_payload_shape() {
        let config = SchedulerConfig::new(true, 5).with_start_from("09:00");
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"enabled": true, "intervalMinutes": 5, "startFromTime": "09:00"})
        );
    }

    #[test]
    fn test_absent_start_time_is_null() {
        let config = SchedulerConfig::new(false, 30);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"enabled": false, "intervalMinutes": 30, "startFromTime": null})
        );
    }
}
