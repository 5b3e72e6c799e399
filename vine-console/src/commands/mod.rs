//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod history;
mod scheduler;

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;
use tokio::sync::mpsc::UnboundedReceiver;
use vine_console::{Notice, SchedulerController};
use vine_core::domain::history::HistoryFilter;
use vine_core::dto::scheduler::{DEFAULT_INTERVAL_MINUTES, SchedulerConfig};

use crate::render;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the scheduler status
    Status,
    /// Start periodic runs
    Start {
        /// Minutes between two runs
        #[arg(short, long, default_value_t = DEFAULT_INTERVAL_MINUTES)]
        interval: u32,
    },
    /// Stop periodic runs
    Stop,
    /// Update the scheduler configuration for future runs
    Config {
        /// Minutes between two runs (1 to 1440)
        #[arg(short, long)]
        interval: u32,

        /// Time of day the schedule starts from
        #[arg(long, value_name = "HH:MM")]
        start_from: Option<String>,

        /// Store the configuration with the scheduler disabled
        #[arg(long)]
        disable: bool,
    },
    /// Trigger one execution now
    RunNow,
    /// Show the job execution history
    History {
        /// Page number, starting at 0
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,

        /// Executions per page (1 to 100)
        #[arg(short, long, allow_negative_numbers = true)]
        size: Option<i64>,

        /// Only show executions from the last N days
        #[arg(short, long, allow_negative_numbers = true)]
        days: Option<i64>,
    },
    /// Show the most recent executions
    Latest {
        /// Number of executions (1 to 50)
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Follow the scheduler status until interrupted
    Watch,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module. Failures are shown
/// through the notification channel and turned into a failing exit code.
pub async fn handle_command(
    command: Commands,
    controller: SchedulerController,
    mut notices: UnboundedReceiver<Notice>,
) -> Result<ExitCode> {
    let succeeded = match command {
        Commands::Status => scheduler::show_status(&controller, &mut notices).await,
        Commands::Start { interval } => {
            scheduler::start(&controller, &mut notices, interval).await
        }
        Commands::Stop => scheduler::stop(&controller, &mut notices).await,
        Commands::Config {
            interval,
            start_from,
            disable,
        } => {
            let config = SchedulerConfig {
                enabled: !disable,
                interval_minutes: interval,
                start_from_time: start_from,
            };
            scheduler::configure(&controller, &mut notices, config).await
        }
        Commands::RunNow => scheduler::run_now(&controller, &mut notices).await,
        Commands::History { page, size, days } => {
            let page_size = size.unwrap_or(controller.filter().page_size);
            let filter = HistoryFilter::new(page, page_size, days);
            history::show_history(&controller, &mut notices, filter).await
        }
        Commands::Latest { limit } => history::show_latest(&controller, &mut notices, limit).await,
        Commands::Watch => {
            scheduler::watch(controller, notices).await;
            return Ok(ExitCode::SUCCESS);
        }
    };

    drain_notices(&mut notices);
    controller.shutdown();

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print every notification emitted so far
pub(crate) fn drain_notices(notices: &mut UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        render::print_notice(&notice);
    }
}
