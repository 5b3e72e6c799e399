//! Job execution domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::timestamp;

/// Outcome of a job execution as reported by the scheduler service
///
/// Deserialization is case-insensitive and accepts the service's own
/// vocabulary (`COMPLETED`, `STARTED`, `FAILED`). Anything unrecognized
/// becomes `Unknown` instead of failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    Success,
    Failure,
    Error,
    Running,
    Unknown,
}

impl ExecutionStatus {
    /// Parses a status label, mapping unknown labels to `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" | "COMPLETED" | "SUCCEEDED" => Self::Success,
            "FAILURE" | "FAILED" => Self::Failure,
            "ERROR" => Self::Error,
            "RUNNING" | "STARTED" => Self::Running,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Error => "ERROR",
            Self::Running => "RUNNING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExecutionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label
            .as_deref()
            .map(Self::from_label)
            .unwrap_or(Self::Unknown))
    }
}

/// Opaque identifier of a job execution
///
/// The service uses numeric ids today; strings are accepted as well so the
/// console does not depend on the storage layout behind the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExecutionId(String);

impl ExecutionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExecutionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// One run of the scheduled job
///
/// Immutable once `end_time` is set. Owned by the service; the console only
/// reads snapshots of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobExecution {
    pub id: ExecutionId,
    #[serde(deserialize_with = "timestamp::required")]
    pub start_time: DateTime<Utc>,
    /// Absent while the execution is still running
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default = "unknown_status")]
    pub status: ExecutionStatus,
    #[serde(default, deserialize_with = "non_negative")]
    pub records_processed: u64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<i64>,
}

impl JobExecution {
    /// Whether the execution has finished
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    /// Message to display for this execution, falling back to the error text
    pub fn display_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error_message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

fn unknown_status() -> ExecutionStatus {
    ExecutionStatus::Unknown
}

/// The service reports `recordsProcessed` as a nullable long
fn non_negative<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.max(0) as u64).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_labels() {
        assert_eq!(ExecutionStatus::from_label("success"), ExecutionStatus::Success);
        assert_eq!(ExecutionStatus::from_label("COMPLETED"), ExecutionStatus::Success);
        assert_eq!(ExecutionStatus::from_label("STARTED"), ExecutionStatus::Running);
        assert_eq!(ExecutionStatus::from_label("Failed"), ExecutionStatus::Failure);
        assert_eq!(ExecutionStatus::from_label("ERROR"), ExecutionStatus::Error);
        assert_eq!(ExecutionStatus::from_label("PAUSED"), ExecutionStatus::Unknown);
    }

    #[test]
    fn test_execution_from_service_payload() {
        let execution: JobExecution = serde_json::from_value(json!({
            "id": 42,
            "jobName": "bookingProcessorJob",
            "startTime": "2024-05-01T10:00:00",
            "endTime": "2024-05-01T10:00:07",
            "status": "COMPLETED",
            "recordsProcessed": 120,
            "errorMessage": null,
            "durationMs": 7000
        }))
        .unwrap();

        assert_eq!(execution.id.as_str(), "42");
        assert_eq!(execution.status, ExecutionStatus::Success);
        assert_eq!(execution.records_processed, 120);
        assert!(execution.is_finished());
        assert_eq!(execution.display_message(), None);
    }

    #[test]
    fn test_running_execution_without_end_time() {
        let execution: JobExecution = serde_json::from_value(json!({
            "id": "run-7",
            "startTime": "2024-05-01T10:00:00Z",
            "status": "RUNNING",
            "recordsProcessed": null,
            "errorMessage": "still going"
        }))
        .unwrap();

        assert!(!execution.is_finished());
        assert_eq!(execution.records_processed, 0);
        assert_eq!(execution.display_message(), Some("still going"));
    }

    #[test]
    fn test_missing_status_is_unknown() {
        let execution: JobExecution = serde_json::from_value(json!({
            "id": 1,
            "startTime": "2024-05-01T10:00:00Z",
            "status": null
        }))
        .unwrap();
        assert_eq!(execution.status, ExecutionStatus::Unknown);
    }
}
