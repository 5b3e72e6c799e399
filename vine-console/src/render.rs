//! Terminal rendering for the console views

use chrono::{DateTime, Local, Utc};
use colored::*;
use vine_console::{ControllerPhase, Notice, NoticeLevel, ViewSnapshot};
use vine_core::domain::execution::{ExecutionStatus, JobExecution};
use vine_core::domain::history::HistoryPage;
use vine_core::domain::scheduler::SchedulerStatus;
use vine_core::view::{self, Severity};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Print a notification
pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{} {}", "✓".green().bold(), notice.message.green()),
        NoticeLevel::Error => eprintln!("{} {}", "✗".red().bold(), notice.message.red()),
    }
}

/// Print the scheduler status panel
pub fn print_status(snapshot: &ViewSnapshot) {
    let Some(status) = &snapshot.status else {
        if snapshot.phase == ControllerPhase::Loading && snapshot.status_error.is_none() {
            println!("{}", "Loading scheduler status...".dimmed());
        } else {
            println!("{}", "Scheduler status unavailable.".yellow());
        }
        return;
    };

    println!("{}", "Scheduler Status:".bold());
    if let Some(job_name) = &status.job_name {
        println!("  Job:         {}", job_name.cyan());
    }
    println!("  State:       {}", running_label(status));
    println!("  Interval:    every {} min", status.interval_minutes);

    if let Some(start_from) = view::start_from_hhmm(status) {
        println!("  Start from:  {}", start_from);
    }

    match view::next_run(status) {
        Some(next) => println!("  Next run:    {}", format_time(next).cyan()),
        None => println!("  Next run:    {}", "-".dimmed()),
    }

    match status.last_run_time {
        Some(last) => {
            let outcome = status
                .last_run_status
                .map(colorize_status)
                .unwrap_or_else(|| "-".dimmed());
            println!("  Last run:    {} ({})", format_time(last), outcome);
        }
        None => println!("  Last run:    {}", "never".dimmed()),
    }

    println!("  Total runs:  {}", status.total_runs);
    if let (Some(ok), Some(failed)) = (status.successful_executions, status.failed_executions) {
        println!(
            "               {} succeeded, {} failed",
            ok.to_string().green(),
            failed.to_string().red()
        );
    }

    if let Some(error) = status.last_error_message.as_deref().filter(|e| !e.is_empty()) {
        println!("  Last error:  {}", error.red());
    }

    if let Some(error) = &snapshot.status_error {
        println!(
            "{}",
            format!("⚠ Showing last known status, refresh failed: {}", error).yellow()
        );
    }
}

/// Print a compact status line for watch mode
pub fn print_status_line(snapshot: &ViewSnapshot) {
    let now = Local::now().format("%H:%M:%S").to_string();

    let Some(status) = &snapshot.status else {
        println!("{} {}", now.dimmed(), "status unavailable".yellow());
        return;
    };

    let next = view::next_run(status)
        .map(format_time)
        .unwrap_or_else(|| "-".to_string());

    let mut line = format!(
        "{} {}  next run: {}  total runs: {}",
        now.dimmed(),
        running_label(status),
        next,
        status.total_runs
    );
    if snapshot.status_error.is_some() {
        line.push_str(&format!("  {}", "(stale)".yellow()));
    }
    println!("{}", line);
}

/// Print a history page with its pagination footer
pub fn print_history(page: &HistoryPage) {
    if page.is_empty() {
        println!("{}", "No executions found.".yellow());
    } else {
        println!(
            "{}",
            format!("Job History ({} execution(s)):", page.total_elements).bold()
        );
        println!();
        print_rows(&page.items);
    }

    let summary = view::page_summary(page);
    let mut footer = summary.to_string();
    if summary.has_previous {
        footer.push_str(&format!(", previous: --page {}", page.page - 1));
    }
    if summary.has_next {
        footer.push_str(&format!(", next: --page {}", page.page + 1));
    }
    println!("{}", footer.dimmed());
}

/// Print executions without pagination
pub fn print_executions(executions: &[JobExecution]) {
    if executions.is_empty() {
        println!("{}", "No executions found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Latest {} execution(s):", executions.len()).bold()
    );
    println!();
    print_rows(executions);
}

fn print_rows(executions: &[JobExecution]) {
    println!(
        "  {:<10} {:<20} {:<10} {:>9} {:>8}  {}",
        "ID", "Started", "Status", "Duration", "Records", "Message"
    );
    println!("  {}", "─".repeat(78).dimmed());

    for execution in executions {
        // Pad before colorizing so escape codes do not break alignment
        let status = format!("{:<10}", execution.status.as_str());
        println!(
            "  {:<10} {:<20} {} {:>9} {:>8}  {}",
            execution.id.as_str(),
            format_time(execution.start_time),
            colorize_severity(&status, view::severity(execution.status)),
            view::execution_duration(execution),
            execution.records_processed,
            execution.display_message().unwrap_or("")
        );
    }
}

fn running_label(status: &SchedulerStatus) -> ColoredString {
    if status.running {
        "● running".green().bold()
    } else {
        "○ stopped".dimmed()
    }
}

fn colorize_status(status: ExecutionStatus) -> ColoredString {
    colorize_severity(status.as_str(), view::severity(status))
}

fn colorize_severity(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Success => text.green(),
        Severity::Danger => text.red(),
        Severity::Info => text.cyan(),
        Severity::Neutral => text.normal(),
    }
}

fn format_time(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format(TIME_FORMAT).to_string()
}
