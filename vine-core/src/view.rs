//! View derivations
//!
//! Pure functions of the data model used by presentation code. Nothing here is
//! stored; callers recompute on every render.

use chrono::{DateTime, NaiveTime, Utc};

use crate::domain::execution::{ExecutionStatus, JobExecution};
use crate::domain::history::HistoryPage;
use crate::domain::scheduler::SchedulerStatus;
use crate::timestamp;

/// Visual weight of an execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Info,
    Neutral,
}

/// Classifies a status for display
pub fn severity(status: ExecutionStatus) -> Severity {
    match status {
        ExecutionStatus::Success => Severity::Success,
        ExecutionStatus::Failure | ExecutionStatus::Error => Severity::Danger,
        ExecutionStatus::Running => Severity::Info,
        ExecutionStatus::Unknown => Severity::Neutral,
    }
}

/// Elapsed time between two instants
///
/// `N/A` while the execution has no end. Below a second the value is shown in
/// milliseconds, below a minute in rounded seconds, otherwise as `Xm Ys`.
pub fn format_duration(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    let Some(end) = end else {
        return "N/A".to_string();
    };

    let millis = end.signed_duration_since(start).num_milliseconds().max(0);

    if millis < 1_000 {
        return format!("{}ms", millis);
    }

    if millis < 60_000 {
        return format!("{}s", (millis + 500) / 1_000);
    }

    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1_000;
    format!("{}m {}s", minutes, seconds)
}

/// Duration of a single execution
pub fn execution_duration(execution: &JobExecution) -> String {
    format_duration(execution.start_time, execution.end_time)
}

/// Next run, shown only while the scheduler is running
pub fn next_run(status: &SchedulerStatus) -> Option<DateTime<Utc>> {
    status.scheduled_next_run()
}

/// `HH:MM` start time for pre-filling a configuration form
///
/// The service echoes the start time back as a full date-time.
pub fn start_from_hhmm(status: &SchedulerStatus) -> Option<String> {
    let raw = status.start_from_time.as_deref()?.trim();

    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Some(time.format("%H:%M").to_string());
    }

    timestamp::parse(raw).map(|dt| dt.format("%H:%M").to_string())
}

/// Pagination state of a history page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// 1-based page number
    pub current: u32,
    pub total: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

impl std::fmt::Display for PageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {} of {}", self.current, self.total.max(1))
    }
}

pub fn page_summary(page: &HistoryPage) -> PageSummary {
    PageSummary {
        current: page.page + 1,
        total: page.total_pages,
        has_previous: page.page > 0,
        has_next: page.page + 1 < page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + Duration::seconds(seconds)
    }

    #[test]
    fn test_format_duration() {
        let start = at(0);
        assert_eq!(format_duration(start, None), "N/A");
        assert_eq!(format_duration(start, Some(start + Duration::milliseconds(250))), "250ms");
        assert_eq!(format_duration(start, Some(start + Duration::milliseconds(1_400))), "1s");
        assert_eq!(format_duration(start, Some(start + Duration::milliseconds(1_600))), "2s");
        assert_eq!(format_duration(start, Some(at(42))), "42s");
        assert_eq!(format_duration(start, Some(at(90))), "1m 30s");
        assert_eq!(format_duration(start, Some(at(3_725))), "62m 5s");
    }

    #[test]
    fn test_negative_duration_clamps_to_zero() {
        assert_eq!(format_duration(at(10), Some(at(0))), "0ms");
    }

    #[test]
    fn test_severity() {
        assert_eq!(severity(ExecutionStatus::Success), Severity::Success);
        assert_eq!(severity(ExecutionStatus::Failure), Severity::Danger);
        assert_eq!(severity(ExecutionStatus::Error), Severity::Danger);
        assert_eq!(severity(ExecutionStatus::Running), Severity::Info);
        assert_eq!(severity(ExecutionStatus::Unknown), Severity::Neutral);
    }

    #[test]
    fn test_next_run_hidden_when_stopped() {
        let mut status = SchedulerStatus::new(true, 30);
        status.next_run_time = Some(at(1_800));
        assert_eq!(next_run(&status), Some(at(1_800)));

        status.running = false;
        assert_eq!(next_run(&status), None);
    }

    #[test]
    fn test_start_from_hhmm() {
        let mut status = SchedulerStatus::new(false, 30);
        assert_eq!(start_from_hhmm(&status), None);

        status.start_from_time = Some("9:05".to_string());
        assert_eq!(start_from_hhmm(&status).as_deref(), Some("09:05"));

        status.start_from_time = Some("2024-04-01T07:30:00".to_string());
        assert_eq!(start_from_hhmm(&status).as_deref(), Some("07:30"));
    }

    #[test]
    fn test_page_summary() {
        let page = HistoryPage::new(Vec::new(), 1, 20, 45);
        let summary = page_summary(&page);
        assert_eq!(summary.current, 2);
        assert_eq!(summary.total, 3);
        assert!(summary.has_previous);
        assert!(summary.has_next);
        assert_eq!(summary.to_string(), "page 2 of 3");

        let last = page_summary(&HistoryPage::new(Vec::new(), 2, 20, 45));
        assert!(!last.has_next);
    }
}
