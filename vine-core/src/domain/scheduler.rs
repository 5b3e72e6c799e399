//! Scheduler status domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::execution::ExecutionStatus;
use crate::timestamp;

/// Snapshot of the remote scheduler
///
/// Replaced wholesale on every successful status fetch or command response.
/// `next_run_time` is only meaningful while `running` is set; see
/// [`SchedulerStatus::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerStatus {
    pub running: bool,
    pub interval_minutes: u32,
    /// Either `HH:MM` or the service's full local date-time
    #[serde(default)]
    pub start_from_time: Option<String>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub last_run_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_run_status: Option<ExecutionStatus>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub next_run_time: Option<DateTime<Utc>>,
    #[serde(default, alias = "totalExecutions")]
    pub total_runs: u64,

    // Extra fields reported by the service
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub job_name: Option<String>,
    /// Free-form scheduler state (`RUNNING`, `STOPPED`, ...)
    #[serde(default, rename = "status")]
    pub state: Option<String>,
    #[serde(default)]
    pub successful_executions: Option<u64>,
    #[serde(default)]
    pub failed_executions: Option<u64>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub last_successful_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error_message: Option<String>,
}

impl SchedulerStatus {
    /// Creates a status with only the required fields set
    pub fn new(running: bool, interval_minutes: u32) -> Self {
        Self {
            running,
            interval_minutes,
            start_from_time: None,
            last_run_time: None,
            last_run_status: None,
            next_run_time: None,
            total_runs: 0,
            enabled: None,
            job_name: None,
            state: None,
            successful_executions: None,
            failed_executions: None,
            last_successful_run: None,
            last_error_message: None,
        }
    }

    /// Drops `next_run_time` when the scheduler is not running
    pub fn normalized(mut self) -> Self {
        if !self.running {
            self.next_run_time = None;
        }
        self
    }

    /// Next planned run, only while the scheduler is running
    pub fn scheduled_next_run(&self) -> Option<DateTime<Utc>> {
        self.next_run_time.filter(|_| self.running)
    }
}
